//! Summarization run: two generator calls per update, then digest selection

use std::path::Path;
use std::time::Duration;

use labnote_common::storage::write_json;
use labnote_common::{LabDigest, LabType};

use crate::digest::build_digest;
use crate::generator::{GenerationRequest, TextGenerator};
use crate::input::{sort_by_date, SourceUpdate};
use crate::prompts::{build_prompt, system_prompt};
use crate::retry::{generate_with_retry, RetryPolicy};
use crate::Result;

/// Knobs for one run
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    pub model: String,
    pub temperature: f32,
    pub retry: RetryPolicy,
    /// Pause after every generator call
    pub pause: Duration,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            model: crate::gemini::DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            retry: RetryPolicy::default(),
            pause: Duration::ZERO,
        }
    }
}

/// Parse a `--sleep` value in (possibly fractional) seconds
pub fn parse_pause_seconds(s: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = s.trim().parse().map_err(|e| format!("{}", e))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err("must be a non-negative number of seconds".to_string());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| format!("{} seconds is too long", s.trim()))
}

/// Wet and dry digests from one run
#[derive(Debug, Clone, PartialEq)]
pub struct DigestPair {
    pub wet: LabDigest,
    pub dry: LabDigest,
}

impl DigestPair {
    pub fn get(&self, lab: LabType) -> &LabDigest {
        match lab {
            LabType::Wet => &self.wet,
            LabType::Dry => &self.dry,
        }
    }
}

/// Summarize every update for both audiences and pick the digests
///
/// Any update whose calls fail after all retries aborts the run.
pub async fn summarize_updates<G>(
    generator: &G,
    updates: Vec<SourceUpdate>,
    options: &SummarizeOptions,
) -> Result<DigestPair>
where
    G: TextGenerator + ?Sized,
{
    let updates = sort_by_date(updates)?;
    let total = updates.len();

    let mut wet_summaries = Vec::with_capacity(total);
    let mut dry_summaries = Vec::with_capacity(total);

    for (i, update) in updates.iter().enumerate() {
        let prompt = build_prompt(update.text.trim());

        for lab in LabType::ALL {
            let request = GenerationRequest {
                model: options.model.clone(),
                system_instruction: system_prompt(lab).to_string(),
                prompt: prompt.clone(),
                temperature: options.temperature,
            };
            let summary = generate_with_retry(generator, &request, &options.retry).await?;
            match lab {
                LabType::Wet => wet_summaries.push(summary),
                LabType::Dry => dry_summaries.push(summary),
            }

            if !options.pause.is_zero() {
                tokio::time::sleep(options.pause).await;
            }
        }

        println!(
            "[{}/{}] {} {}",
            i + 1,
            total,
            update.date,
            update.project_id.as_deref().unwrap_or("-")
        );
    }

    Ok(DigestPair {
        wet: build_digest(LabType::Wet, &updates, &wet_summaries),
        dry: build_digest(LabType::Dry, &updates, &dry_summaries),
    })
}

/// Write both digests as pretty JSON
pub async fn write_digests(digests: &DigestPair, wet_out: &Path, dry_out: &Path) -> Result<()> {
    write_json(wet_out, &digests.wet).await?;
    println!("Wrote: {}", wet_out.display());
    write_json(dry_out, &digests.dry).await?;
    println!("Wrote: {}", dry_out.display());
    Ok(())
}
