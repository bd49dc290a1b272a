use std::collections::HashMap;

use serde::Deserialize;

/// One server-computed practice-session score snapshot.
/// Scores are percentages in [0, 100]; `created_at` is an ISO-8601 timestamp.
#[derive(Clone, Debug, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub pitch_score: f64,
    pub tempo_score: f64,
    pub energy_score: f64,
    pub final_score: f64,
    #[serde(rename = "deleteFlag", default)]
    pub delete_flag: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MetricsResponse {
    pub success: bool,
    #[serde(default)]
    pub metrics: Vec<MetricRecord>,
}

/// Parallel series feeding the score chart. All five vectors are kept the
/// same length; the chart replaces its data wholesale on each update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreSeries {
    pub labels: Vec<String>,
    pub pitch: Vec<f64>,
    pub tempo: Vec<f64>,
    pub energy: Vec<f64>,
    pub overall: Vec<f64>,
}

impl ScoreSeries {
    /// Build chart series from a chronological metric list. Records carrying
    /// the delete flag are skipped; the server keeps them for bookkeeping.
    pub fn from_records(records: &[MetricRecord]) -> Self {
        let mut series = Self::default();
        for record in records {
            if record.delete_flag {
                continue;
            }
            series.labels.push(crate::format::short_timestamp(&record.created_at));
            series.pitch.push(record.pitch_score);
            series.tempo.push(record.tempo_score);
            series.energy.push(record.energy_score);
            series.overall.push(record.final_score);
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Latest final score, if any record survived filtering.
    pub fn latest_overall(&self) -> Option<f64> {
        self.overall.last().copied()
    }
}

/// Payload of the `chartjsResultData` JSON island the server embeds after a
/// comparison run. Chroma matrices are 12 pitch-class rows of frame energies.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ResultChartData {
    #[serde(default)]
    pub ref_onsets: Vec<f64>,
    #[serde(default)]
    pub user_onsets: Vec<f64>,
    #[serde(default)]
    pub ref_chroma: Vec<Vec<f64>>,
    #[serde(default)]
    pub user_chroma: Vec<Vec<f64>>,
}

impl ResultChartData {
    pub fn has_onsets(&self) -> bool {
        !self.ref_onsets.is_empty() && !self.user_onsets.is_empty()
    }

    pub fn has_chroma(&self) -> bool {
        !self.ref_chroma.is_empty() && !self.user_chroma.is_empty()
    }

    /// Mean absolute chroma difference per pitch-class bin.
    /// Rows missing from either matrix are skipped.
    pub fn chroma_diff_means(&self) -> Vec<f64> {
        self.ref_chroma
            .iter()
            .zip(self.user_chroma.iter())
            .map(|(ref_row, user_row)| {
                let n = ref_row.len().min(user_row.len());
                if n == 0 {
                    return 0.0;
                }
                let sum: f64 = ref_row
                    .iter()
                    .zip(user_row.iter())
                    .take(n)
                    .map(|(a, b)| (a - b).abs())
                    .sum();
                sum / n as f64
            })
            .collect()
    }
}

/// JSON body of the signup/signin endpoints. Field errors arrive keyed by
/// form field name; `__all__` carries non-field errors.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub reload: bool,
}

impl AuthOutcome {
    /// Server-supplied failure text: `error` wins, else all field messages
    /// flattened in arrival order.
    pub fn error_text(&self) -> Option<String> {
        if let Some(err) = &self.error {
            return Some(err.clone());
        }
        let errors = self.errors.as_ref()?;
        let flat: Vec<&str> = errors
            .values()
            .flat_map(|msgs| msgs.iter().map(String::as_str))
            .collect();
        if flat.is_empty() {
            None
        } else {
            Some(flat.join("، "))
        }
    }
}

/// JSON body of the reference-audio upload endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UploadOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One selectable reference piece on the exercise page.
#[derive(Clone, Debug, PartialEq)]
pub struct SongRef {
    /// Server-side reference identifier (file name).
    pub reference: String,
    /// Display title on the card.
    pub title: String,
    /// True for pieces the user uploaded this session.
    pub uploaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_record_parses_server_shape() {
        let json = r#"{
            "createdAt": "2025-11-02T18:41:07.123Z",
            "pitch_score": 81.5,
            "tempo_score": 74.0,
            "energy_score": 66.25,
            "final_score": 77.9,
            "deleteFlag": false
        }"#;
        let record: MetricRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.created_at, "2025-11-02T18:41:07.123Z");
        assert_eq!(record.final_score, 77.9);
        assert!(!record.delete_flag);
    }

    #[test]
    fn metric_record_tolerates_missing_delete_flag() {
        let json = r#"{
            "createdAt": "2025-11-02T18:41:07Z",
            "pitch_score": 50.0,
            "tempo_score": 50.0,
            "energy_score": 50.0,
            "final_score": 50.0
        }"#;
        let record: MetricRecord = serde_json::from_str(json).unwrap();
        assert!(!record.delete_flag);
    }

    #[test]
    fn series_skips_delete_flagged_records() {
        let records = vec![
            MetricRecord {
                created_at: "2025-11-01T10:00:00Z".into(),
                pitch_score: 10.0,
                tempo_score: 20.0,
                energy_score: 30.0,
                final_score: 40.0,
                delete_flag: false,
            },
            MetricRecord {
                created_at: "2025-11-02T10:00:00Z".into(),
                pitch_score: 1.0,
                tempo_score: 2.0,
                energy_score: 3.0,
                final_score: 4.0,
                delete_flag: true,
            },
        ];
        let series = ScoreSeries::from_records(&records);
        assert_eq!(series.len(), 1);
        assert_eq!(series.overall, vec![40.0]);
        assert_eq!(series.latest_overall(), Some(40.0));
    }

    #[test]
    fn empty_metrics_yield_empty_series() {
        let series = ScoreSeries::from_records(&[]);
        assert!(series.is_empty());
        assert_eq!(series.latest_overall(), None);
    }

    #[test]
    fn chroma_diff_means_per_bin() {
        let data = ResultChartData {
            ref_chroma: vec![vec![1.0, 0.0], vec![0.5, 0.5]],
            user_chroma: vec![vec![0.0, 1.0], vec![0.5, 0.5]],
            ..Default::default()
        };
        let means = data.chroma_diff_means();
        assert_eq!(means, vec![1.0, 0.0]);
    }

    #[test]
    fn chroma_diff_handles_ragged_rows() {
        let data = ResultChartData {
            ref_chroma: vec![vec![1.0, 1.0, 1.0]],
            user_chroma: vec![vec![0.0]],
            ..Default::default()
        };
        assert_eq!(data.chroma_diff_means(), vec![1.0]);
    }

    #[test]
    fn auth_outcome_parses_field_errors() {
        let json = r#"{"success": false, "errors": {"username": ["Taken"], "__all__": ["Bad"]}}"#;
        let outcome: AuthOutcome = serde_json::from_str(json).unwrap();
        assert!(!outcome.success);
        let errors = outcome.errors.as_ref().unwrap();
        assert_eq!(errors["username"], vec!["Taken".to_string()]);
        assert!(outcome.error_text().is_some());
    }

    #[test]
    fn auth_outcome_error_field_wins() {
        let json = r#"{"success": false, "error": "Invalid request method."}"#;
        let outcome: AuthOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.error_text().as_deref(), Some("Invalid request method."));
    }

    #[test]
    fn auth_outcome_defaults_are_quiet() {
        let outcome: AuthOutcome = serde_json::from_str(r#"{"success": true, "reload": true}"#).unwrap();
        assert!(outcome.success);
        assert!(outcome.reload);
        assert_eq!(outcome.error_text(), None);
    }

    #[test]
    fn upload_outcome_parses_filename() {
        let json = r#"{"success": true, "filename": "ref_fur_elise.mp3"}"#;
        let outcome: UploadOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.filename.as_deref(), Some("ref_fur_elise.mp3"));
    }
}
