// this_file: src/job.rs

//! Job specifications and JSONL results.
//!
//! Defines the JSON job format the CLI accepts and the result lines it
//! writes back, one per job.

use anyhow::Context;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use textrail_core::{
    text_along_path, text_along_path_multi, FormatOptions, GuidePath, Jitter,
};
use textrail_ttf::TtfMetrics;

use crate::svg::SvgWriter;

/// Name of the environment variable supplying the default font, as
/// `path:size`.
pub const FONT_ENV: &str = "TEXTRAIL_FONT";

/// Complete job specification (top-level JSON input).
#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    /// API version (must be "1.0")
    pub version: String,
    /// Layout jobs to process, in order
    pub jobs: Vec<Job>,
}

/// Single layout job.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Unique job identifier for correlation with results
    pub id: String,
    /// Font to measure with; falls back to `TEXTRAIL_FONT` when absent
    #[serde(default)]
    pub font: Option<FontConfig>,
    /// Text to place
    pub text: TextConfig,
    /// Guide path the text rides on
    pub guide: GuideConfig,
    /// Layout options
    #[serde(default)]
    pub options: FormatOptions,
    /// Jitter seed; omitted means a fresh seed per run
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Font configuration for a job.
#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    /// Path to the font file
    pub path: Utf8PathBuf,
    /// Font size in pixels
    pub size: f64,
}

/// Text configuration for a job.
#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    /// Text content; with `multi_line`, one line per guide stroke
    pub content: String,
    /// Spacer between repetitions
    #[serde(default)]
    pub joiner: String,
    /// Distribute lines of `content` over the guide's strokes
    #[serde(default)]
    pub multi_line: bool,
}

/// Guide path configuration for a job.
#[derive(Debug, Clone, Deserialize)]
pub struct GuideConfig {
    /// Name used in generated path names
    #[serde(default = "default_guide_name")]
    pub name: String,
    /// SVG path data of the guide
    pub path_data: String,
}

fn default_guide_name() -> String {
    "guide".to_string()
}

/// Job result (JSONL output line).
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    /// Job ID (matches input)
    pub id: String,
    /// Status: "success" or "error"
    pub status: String,
    /// Layout output (only present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RunOutput>,
    /// Error message (only present on error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Output of one successful job.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    /// Generated paths, in creation order
    pub paths: Vec<PathOutput>,
    /// Standalone SVG document with all paths
    pub svg: String,
}

/// One generated path.
#[derive(Debug, Clone, Serialize)]
pub struct PathOutput {
    pub name: String,
    /// SVG path data
    pub d: String,
}

impl JobSpec {
    /// Validates the specification structure and every job in it.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.version != "1.0" {
            anyhow::bail!(
                "unsupported API version '{}', expected '1.0'",
                self.version
            );
        }
        if self.jobs.is_empty() {
            anyhow::bail!("jobs array is empty");
        }
        for job in &self.jobs {
            job.validate()
                .with_context(|| format!("job '{}'", job.id))?;
        }
        Ok(())
    }
}

impl Job {
    /// Validates individual job parameters.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.id.is_empty() {
            anyhow::bail!("job ID is empty");
        }
        if let Some(font) = &self.font {
            if !(1.0..=1000.0).contains(&font.size) {
                anyhow::bail!("font size {} out of bounds (1-1000)", font.size);
            }
        }
        if self.text.content.is_empty() {
            anyhow::bail!("text content is empty");
        }
        if self.guide.path_data.trim().is_empty() {
            anyhow::bail!("guide path data is empty");
        }
        Ok(())
    }

    /// The font to measure with: the job's own, or the `TEXTRAIL_FONT`
    /// environment fallback.
    pub fn resolve_font(&self) -> anyhow::Result<(Utf8PathBuf, f64)> {
        if let Some(font) = &self.font {
            return Ok((font.path.clone(), font.size));
        }
        let spec = std::env::var(FONT_ENV)
            .with_context(|| format!("job has no font and {FONT_ENV} is not set"))?;
        parse_font_spec(&spec)
    }
}

/// Parses a `path:size` font specification.
pub fn parse_font_spec(spec: &str) -> anyhow::Result<(Utf8PathBuf, f64)> {
    let (path, size) = spec
        .rsplit_once(':')
        .with_context(|| format!("font spec '{spec}' must be 'path:size'"))?;
    let size: f64 = size
        .parse()
        .with_context(|| format!("invalid font size '{size}'"))?;
    Ok((Utf8PathBuf::from(path), size))
}

/// Runs one job and folds the outcome into a result line. A seed given
/// on the command line overrides the job's own.
pub fn process_job(job: &Job, seed_override: Option<u64>) -> JobResult {
    match run_job(job, seed_override) {
        Ok(output) => JobResult {
            id: job.id.clone(),
            status: "success".to_string(),
            result: Some(output),
            error: None,
        },
        Err(e) => {
            log::error!("job '{}' failed: {e:#}", job.id);
            JobResult {
                id: job.id.clone(),
                status: "error".to_string(),
                result: None,
                error: Some(format!("{e:#}")),
            }
        }
    }
}

fn run_job(job: &Job, seed_override: Option<u64>) -> anyhow::Result<RunOutput> {
    let (font_path, size) = job.resolve_font()?;
    let metrics = TtfMetrics::from_path(font_path.as_std_path(), size)?;
    let guide = GuidePath::from_svg_data(job.guide.name.as_str(), &job.guide.path_data)?;
    let mut jitter = match seed_override.or(job.seed) {
        Some(seed) => Jitter::seeded(seed),
        None => Jitter::from_entropy(),
    };

    let paths = if job.text.multi_line {
        text_along_path_multi(
            &metrics,
            &guide,
            &job.text.content,
            &job.text.joiner,
            &job.options,
            &mut jitter,
        )?
    } else {
        text_along_path(
            &metrics,
            &guide,
            &job.text.content,
            &job.text.joiner,
            &job.options,
            &mut jitter,
        )?
    };

    let svg = SvgWriter::default().write(&paths);
    let outputs = paths
        .iter()
        .map(|p| PathOutput {
            name: p.name.clone(),
            d: p.path.to_svg(),
        })
        .collect();
    Ok(RunOutput {
        paths: outputs,
        svg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job_json() -> &'static str {
        r#"{
            "version": "1.0",
            "jobs": [{
                "id": "arc-banner",
                "font": {
                    "path": "/fonts/DejaVuSans.ttf",
                    "size": 24.0
                },
                "text": {
                    "content": "HELLO",
                    "joiner": " * "
                },
                "guide": {
                    "name": "arc",
                    "path_data": "M 0 100 C 50 0 150 0 200 100"
                },
                "options": {
                    "layout": "Repeat"
                },
                "seed": 7
            }]
        }"#
    }

    #[test]
    fn test_parse_valid_job_spec() {
        let spec: JobSpec = serde_json::from_str(sample_job_json()).unwrap();
        assert_eq!(spec.version, "1.0");
        assert_eq!(spec.jobs.len(), 1);
        assert_eq!(spec.jobs[0].id, "arc-banner");
        assert_eq!(spec.jobs[0].text.joiner, " * ");
        assert_eq!(spec.jobs[0].guide.name, "arc");
        assert_eq!(spec.jobs[0].seed, Some(7));
    }

    #[test]
    fn test_validate_valid_spec() {
        let spec: JobSpec = serde_json::from_str(sample_job_json()).unwrap();
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_version() {
        let json = r#"{"version": "2.0", "jobs": []}"#;
        let spec: JobSpec = serde_json::from_str(json).unwrap();
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported API version"));
    }

    #[test]
    fn test_validate_rejects_empty_jobs() {
        let json = r#"{"version": "1.0", "jobs": []}"#;
        let spec: JobSpec = serde_json::from_str(json).unwrap();
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_validate_rejects_font_size_out_of_bounds() {
        let mut spec: JobSpec = serde_json::from_str(sample_job_json()).unwrap();
        spec.jobs[0].font.as_mut().unwrap().size = 0.0;
        assert!(spec.validate().is_err());
        spec.jobs[0].font.as_mut().unwrap().size = 1001.0;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_guide_name_defaults() {
        let json = r#"{
            "id": "j",
            "text": {"content": "A"},
            "guide": {"path_data": "M 0 0 L 10 0"}
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.guide.name, "guide");
        assert!(job.font.is_none());
        assert!(!job.text.multi_line);
    }

    #[test]
    fn test_parse_font_spec() {
        let (path, size) = parse_font_spec("/fonts/DejaVuSans.ttf:24").unwrap();
        assert_eq!(path, Utf8PathBuf::from("/fonts/DejaVuSans.ttf"));
        assert_eq!(size, 24.0);
        assert!(parse_font_spec("no-size").is_err());
        assert!(parse_font_spec("font.ttf:big").is_err());
    }

    #[test]
    fn test_missing_font_file_reports_error_status() {
        let mut spec: JobSpec = serde_json::from_str(sample_job_json()).unwrap();
        spec.jobs[0].font.as_mut().unwrap().path = Utf8PathBuf::from("/definitely/not/here.ttf");
        let result = process_job(&spec.jobs[0], None);
        assert_eq!(result.status, "error");
        assert!(result.result.is_none());
        assert!(result.error.unwrap().contains("here.ttf"));
    }

    #[test]
    fn test_serialize_result_skips_absent_fields() {
        let success = JobResult {
            id: "j".to_string(),
            status: "success".to_string(),
            result: Some(RunOutput {
                paths: vec![PathOutput {
                    name: "'A' over <guide>".to_string(),
                    d: "M0 0L1 1".to_string(),
                }],
                svg: "<svg/>".to_string(),
            }),
            error: None,
        };
        let json = serde_json::to_string(&success).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(!json.contains("\"error\""));

        let failure = JobResult {
            id: "j".to_string(),
            status: "error".to_string(),
            result: None,
            error: Some("text is too long".to_string()),
        };
        let json = serde_json::to_string(&failure).unwrap();
        assert!(json.contains("\"error\""));
        assert!(!json.contains("\"result\""));
    }
}
