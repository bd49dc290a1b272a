//! Demo price estimation for the estimator page.
//!
//! This mirrors the server placeholder: a base figure plus fixed brand and
//! material factors and a clamped linear dimension term. It is a stand-in
//! for a real pricing backend, not an estimation algorithm.

pub const BRANDS: &[&str] = &["Yamaha", "Steinway & Sons", "Kawai", "Fazioli", "Bechstein"];
pub const MATERIALS: &[&str] = &["چوب افرا", "چوب گردو", "چوب راش", "فلز"];

const BASE_PRICE: u64 = 5000;
const OTHER_BRAND_FACTOR: u64 = 1000;
const OTHER_MATERIAL_FACTOR: u64 = 700;
const MAX_DIMENSION_CM: f64 = 300.0;

fn brand_factor(brand: &str) -> u64 {
    match brand {
        "Yamaha" => 2000,
        "Steinway & Sons" => 8000,
        "Kawai" => 1500,
        "Fazioli" => 10_000,
        "Bechstein" => 7000,
        _ => OTHER_BRAND_FACTOR,
    }
}

fn material_factor(material: &str) -> u64 {
    match material {
        "چوب افرا" => 1000,
        "چوب گردو" => 1200,
        "چوب راش" => 900,
        "فلز" => 500,
        _ => OTHER_MATERIAL_FACTOR,
    }
}

/// Estimated price in toman. The model name is accepted for parity with the
/// form but does not affect the figure. Dimension is clamped to
/// [0, 300] cm before scaling; non-numeric input counts as 0.
pub fn estimate_price(brand: &str, _model: &str, dimension_cm: f64, material: &str) -> u64 {
    let clamped = dimension_cm.max(0.0).min(MAX_DIMENSION_CM);
    BASE_PRICE + brand_factor(brand) + material_factor(material) + (clamped * 10.0).round() as u64
}

/// Static market figures behind the estimator charts.
pub struct MarketData {
    pub brand_prices: &'static [(&'static str, u64)],
    pub material_averages: &'static [(&'static str, u64)],
    pub dimension_vs_price: &'static [(f64, f64)],
}

pub const MARKET: MarketData = MarketData {
    brand_prices: &[
        ("Steinway & Sons", 180_000),
        ("Fazioli", 150_000),
        ("Bechstein", 120_000),
        ("Yamaha", 90_000),
        ("Kawai", 85_000),
    ],
    material_averages: &[
        ("چوب افرا", 95_000),
        ("چوب گردو", 110_000),
        ("چوب راش", 80_000),
        ("فلز", 60_000),
    ],
    dimension_vs_price: &[
        (150.0, 90_000.0),
        (180.0, 110_000.0),
        (200.0, 130_000.0),
        (220.0, 150_000.0),
        (250.0, 170_000.0),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_brand_and_material() {
        // base 5000 + Yamaha 2000 + افرا 1000 + 200cm*10
        assert_eq!(estimate_price("Yamaha", "U3", 200.0, "چوب افرا"), 10_000);
    }

    #[test]
    fn unknown_brand_and_material_use_other_factors() {
        let price = estimate_price("Petrof", "", 0.0, "پلاستیک");
        assert_eq!(price, BASE_PRICE + OTHER_BRAND_FACTOR + OTHER_MATERIAL_FACTOR);
    }

    #[test]
    fn negative_dimension_clamps_to_zero() {
        let at_zero = estimate_price("Kawai", "", 0.0, "فلز");
        assert_eq!(estimate_price("Kawai", "", -50.0, "فلز"), at_zero);
    }

    #[test]
    fn oversized_dimension_clamps_to_ceiling() {
        let at_max = estimate_price("Kawai", "", 300.0, "فلز");
        assert_eq!(estimate_price("Kawai", "", 500.0, "فلز"), at_max);
        // 300 cm contributes exactly 3000
        assert_eq!(at_max, BASE_PRICE + 1500 + 500 + 3000);
    }

    #[test]
    fn non_numeric_dimension_counts_as_zero() {
        let nan = f64::NAN;
        let at_zero = estimate_price("Fazioli", "", 0.0, "چوب گردو");
        assert_eq!(estimate_price("Fazioli", "", nan, "چوب گردو"), at_zero);
    }

    #[test]
    fn model_does_not_change_the_figure() {
        assert_eq!(
            estimate_price("Bechstein", "Concert 8", 180.0, "چوب راش"),
            estimate_price("Bechstein", "", 180.0, "چوب راش"),
        );
    }
}
