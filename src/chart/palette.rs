//! Fixed chart palettes, one per theme. Dataset colors are indexed by
//! position so a theme change recolors without touching chart data.

use crate::theme::Theme;

/// Score chart dataset order: pitch, tempo, energy, final.
pub const SCORE_LABELS: [&str; 4] = ["دقت نت‌ها", "ریتم", "انرژی", "امتیاز نهایی"];

pub const CHROMA_LABELS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub struct Palette {
    pub grid: &'static str,
    pub text: &'static str,
    /// One color per score dataset, same order as `SCORE_LABELS`.
    pub score_series: [&'static str; 4],
    pub ref_onsets: &'static str,
    pub user_onsets: &'static str,
    pub scatter: &'static str,
    /// Categorical colors for bar/pie charts, cycled by index.
    pub categorical: [&'static str; 5],
}

static LIGHT: Palette = Palette {
    grid: "#eeeeee",
    text: "#333333",
    score_series: ["#6a11cb", "#2575fc", "#f7971e", "#43cea2"],
    ref_onsets: "#43cea2",
    user_onsets: "#fd5c63",
    scatter: "#2575fc",
    categorical: ["#6a11cb", "#2575fc", "#43cea2", "#f7971e", "#fd5c63"],
};

static DARK: Palette = Palette {
    grid: "#3a3a3a",
    text: "#d8d8d8",
    score_series: ["#a46bf0", "#5d9bff", "#ffb05c", "#5fe0b7"],
    ref_onsets: "#5fe0b7",
    user_onsets: "#ff7a80",
    scatter: "#5d9bff",
    categorical: ["#a46bf0", "#5d9bff", "#5fe0b7", "#ffb05c", "#ff7a80"],
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

/// One hue per chroma bin, 30° apart around the wheel.
pub fn chroma_bin_color(bin: usize) -> String {
    format!("hsl({}, 70%, 60%)", (bin % 12) * 30)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_carry_distinct_series_colors() {
        assert_ne!(
            palette(Theme::Light).score_series,
            palette(Theme::Dark).score_series
        );
    }

    #[test]
    fn chroma_hues_step_by_thirty_degrees() {
        assert_eq!(chroma_bin_color(0), "hsl(0, 70%, 60%)");
        assert_eq!(chroma_bin_color(1), "hsl(30, 70%, 60%)");
        assert_eq!(chroma_bin_color(11), "hsl(330, 70%, 60%)");
        // wraps past a full octave
        assert_eq!(chroma_bin_color(12), chroma_bin_color(0));
    }

    #[test]
    fn one_label_and_color_per_score_dataset() {
        assert_eq!(SCORE_LABELS.len(), palette(Theme::Light).score_series.len());
    }
}
