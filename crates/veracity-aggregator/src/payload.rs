//! Parse opaque assessment payloads into per-subsystem assessments

use crate::error::EntityAssessmentError;
use serde::{Deserialize, Serialize};
use veracity_domain::scoring::{
    eve_score, framework_score, mom_score, moses_score, pop_score, FrameworkComponents,
    FIVE_POINT_SCALE_FACTOR,
};
use veracity_domain::{PopLevel, Severity, Subsystem};

/// Motive, opportunity and means sub-scores (each 0-5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomAssessment {
    /// Reason to deceive
    pub motive: f64,
    /// Access and timing to deceive
    pub opportunity: f64,
    /// Capability to deceive
    pub means: f64,
}

/// Categorical pattern-of-life risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopAssessment {
    /// One of high, medium, low
    #[serde(alias = "level")]
    pub risk_level: String,
}

/// Evidence quality sub-scores (each 0-5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EveAssessment {
    /// Higher is better
    pub internal_consistency: f64,
    /// Higher is better
    pub external_corroboration: f64,
    /// Higher is worse
    pub anomaly_detection: f64,
}

/// Source reliability sub-scores (each 0-5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosesAssessment {
    /// Exposure of the source to control or coercion
    pub vulnerability: f64,
    /// Observed signs of manipulation
    pub manipulation_evidence: f64,
}

/// Per-claim deception score (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimAssessment {
    /// Deception likelihood, 0-100
    #[serde(alias = "deception_score")]
    pub risk_score: f64,
}

/// Saved worksheet carrying its own component sub-scores
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameworkAssessment {
    /// MOM worksheet section
    #[serde(default)]
    pub mom: Option<MomAssessment>,
    /// POP worksheet section
    #[serde(default)]
    pub pop: Option<PopAssessment>,
    /// MOSES worksheet section
    #[serde(default)]
    pub moses: Option<MosesAssessment>,
    /// EVE worksheet section
    #[serde(default)]
    pub eve: Option<EveAssessment>,
}

/// A parsed, range-checked assessment for one subsystem
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    /// Actor MOM scores
    Mom(MomAssessment),
    /// Actor pattern-of-life level
    Pop(PopLevel),
    /// Evidence quality scores
    Eve(EveAssessment),
    /// Source reliability scores
    Moses(MosesAssessment),
    /// Claim deception score
    Claim(ClaimAssessment),
    /// Saved worksheet components
    Framework(FrameworkAssessment),
}

impl Assessment {
    /// Parse a payload for `subsystem`, rejecting malformed or out-of-range data
    pub fn parse(subsystem: Subsystem, payload: &str) -> Result<Self, EntityAssessmentError> {
        let assessment = match subsystem {
            Subsystem::Mom => Assessment::Mom(serde_json::from_str(payload)?),
            Subsystem::Pop => {
                let pop: PopAssessment = serde_json::from_str(payload)?;
                Assessment::Pop(parse_pop_level(&pop)?)
            }
            Subsystem::Eve => Assessment::Eve(serde_json::from_str(payload)?),
            Subsystem::Moses => Assessment::Moses(serde_json::from_str(payload)?),
            Subsystem::Claim => Assessment::Claim(serde_json::from_str(payload)?),
            Subsystem::Framework => Assessment::Framework(serde_json::from_str(payload)?),
        };

        assessment.validate()?;
        Ok(assessment)
    }

    /// Subsystem this assessment belongs to
    pub fn subsystem(&self) -> Subsystem {
        match self {
            Assessment::Mom(_) => Subsystem::Mom,
            Assessment::Pop(_) => Subsystem::Pop,
            Assessment::Eve(_) => Subsystem::Eve,
            Assessment::Moses(_) => Subsystem::Moses,
            Assessment::Claim(_) => Subsystem::Claim,
            Assessment::Framework(_) => Subsystem::Framework,
        }
    }

    /// Native raw score per the subsystem's formula
    pub fn raw_score(&self) -> f64 {
        match self {
            Assessment::Mom(m) => mom_raw(m),
            Assessment::Pop(level) => pop_score(*level),
            Assessment::Eve(e) => eve_raw(e),
            Assessment::Moses(m) => moses_raw(m),
            Assessment::Claim(c) => c.risk_score,
            Assessment::Framework(f) => framework_score(&framework_components(f)),
        }
    }

    /// Explanation assembled from the contributing sub-scores
    pub fn details(&self) -> String {
        let raw = self.raw_score();
        match self {
            Assessment::Mom(m) => format!(
                "motive {:.1}, opportunity {:.1}, means {:.1} (mean {:.2}/5)",
                m.motive, m.opportunity, m.means, raw
            ),
            Assessment::Pop(level) => format!(
                "pattern-of-life risk {} (approximate surrogate {:.1}/5)",
                level.as_str(),
                raw
            ),
            Assessment::Eve(e) => format!(
                "internal consistency {:.1}, external corroboration {:.1}, anomalies {:.1} (risk {:.2}/5, {})",
                e.internal_consistency,
                e.external_corroboration,
                e.anomaly_detection,
                raw,
                evidence_verdict(Severity::classify(Subsystem::Eve, raw))
            ),
            Assessment::Moses(m) => format!(
                "vulnerability {:.1}, manipulation evidence {:.1} (mean {:.2}/5, {})",
                m.vulnerability,
                m.manipulation_evidence,
                raw,
                source_verdict(Severity::classify(Subsystem::Moses, raw))
            ),
            Assessment::Claim(_) => format!("deception risk {:.0}/100", raw),
            Assessment::Framework(f) => {
                let c = framework_components(f);
                format!(
                    "worksheet likelihoods MOM {}, POP {}, MOSES {}, EVE {} (blended {:.1}/100)",
                    likelihood_label(c.mom),
                    likelihood_label(c.pop),
                    likelihood_label(c.moses),
                    likelihood_label(c.eve),
                    raw
                )
            }
        }
    }

    fn validate(&self) -> Result<(), EntityAssessmentError> {
        match self {
            Assessment::Mom(m) => validate_mom(m),
            Assessment::Pop(_) => Ok(()),
            Assessment::Eve(e) => validate_eve(e),
            Assessment::Moses(m) => validate_moses(m),
            Assessment::Claim(c) => check_range("risk_score", c.risk_score, 0.0, 100.0),
            Assessment::Framework(f) => {
                if f.mom.is_none() && f.pop.is_none() && f.moses.is_none() && f.eve.is_none() {
                    return Err(EntityAssessmentError::MissingComponents);
                }
                if let Some(m) = &f.mom {
                    validate_mom(m)?;
                }
                if let Some(p) = &f.pop {
                    parse_pop_level(p)?;
                }
                if let Some(m) = &f.moses {
                    validate_moses(m)?;
                }
                if let Some(e) = &f.eve {
                    validate_eve(e)?;
                }
                Ok(())
            }
        }
    }
}

fn mom_raw(m: &MomAssessment) -> f64 {
    mom_score(m.motive, m.opportunity, m.means)
}

fn eve_raw(e: &EveAssessment) -> f64 {
    eve_score(e.internal_consistency, e.external_corroboration, e.anomaly_detection)
}

fn moses_raw(m: &MosesAssessment) -> f64 {
    moses_score(m.vulnerability, m.manipulation_evidence)
}

/// Recombine worksheet sub-scores with the standalone subsystem formulas
fn framework_components(f: &FrameworkAssessment) -> FrameworkComponents {
    FrameworkComponents {
        mom: f.mom.as_ref().map(mom_raw),
        // Unknown levels are rejected by validation before scoring
        pop: f
            .pop
            .as_ref()
            .and_then(|p| PopLevel::parse(&p.risk_level))
            .map(pop_score),
        moses: f.moses.as_ref().map(moses_raw),
        eve: f.eve.as_ref().map(eve_raw),
    }
}

fn parse_pop_level(pop: &PopAssessment) -> Result<PopLevel, EntityAssessmentError> {
    PopLevel::parse(&pop.risk_level)
        .ok_or_else(|| EntityAssessmentError::UnknownLevel(pop.risk_level.clone()))
}

fn validate_mom(m: &MomAssessment) -> Result<(), EntityAssessmentError> {
    check_range("motive", m.motive, 0.0, 5.0)?;
    check_range("opportunity", m.opportunity, 0.0, 5.0)?;
    check_range("means", m.means, 0.0, 5.0)
}

fn validate_eve(e: &EveAssessment) -> Result<(), EntityAssessmentError> {
    check_range("internal_consistency", e.internal_consistency, 0.0, 5.0)?;
    check_range("external_corroboration", e.external_corroboration, 0.0, 5.0)?;
    check_range("anomaly_detection", e.anomaly_detection, 0.0, 5.0)
}

fn validate_moses(m: &MosesAssessment) -> Result<(), EntityAssessmentError> {
    check_range("vulnerability", m.vulnerability, 0.0, 5.0)?;
    check_range("manipulation_evidence", m.manipulation_evidence, 0.0, 5.0)
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), EntityAssessmentError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EntityAssessmentError::OutOfRange { field, value, min, max })
    }
}

fn likelihood_label(native: Option<f64>) -> String {
    native
        .map(|v| format!("{:.0}", v * FIVE_POINT_SCALE_FACTOR))
        .unwrap_or_else(|| "n/a".to_string())
}

fn evidence_verdict(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "verified",
        Severity::Medium => "needs review",
        Severity::High | Severity::Critical => "suspect",
    }
}

fn source_verdict(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "solid",
        Severity::Medium => "unreliable",
        Severity::High | Severity::Critical => "compromised",
    }
}
