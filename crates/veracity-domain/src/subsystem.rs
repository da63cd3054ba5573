//! Subsystem module - the independent scoring methods feeding an aggregation

/// Scoring subsystem that produced a risk signal
///
/// Identifies the scoring method, not the storage table. Declaration order is
/// significant: it is the tie-break order used when ranking alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subsystem {
    /// Motive, opportunity and means (actor predisposition)
    Mom,

    /// Pattern of life (actor behavioral history)
    Pop,

    /// Evaluation of evidence (consistency, corroboration, anomalies)
    Eve,

    /// Manipulability of sources (vulnerability, manipulation evidence)
    Moses,

    /// Per-claim deception likelihood
    Claim,

    /// Manually saved deception worksheet
    Framework,
}

impl Subsystem {
    /// All subsystems in declaration order
    pub const ALL: [Subsystem; 6] = [
        Subsystem::Mom,
        Subsystem::Pop,
        Subsystem::Eve,
        Subsystem::Moses,
        Subsystem::Claim,
        Subsystem::Framework,
    ];

    /// Order in which recommended actions are emitted
    pub const ACTION_PRIORITY: [Subsystem; 5] = [
        Subsystem::Framework,
        Subsystem::Mom,
        Subsystem::Eve,
        Subsystem::Moses,
        Subsystem::Claim,
    ];

    /// Get the subsystem name as an uppercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Subsystem::Mom => "MOM",
            Subsystem::Pop => "POP",
            Subsystem::Eve => "EVE",
            Subsystem::Moses => "MOSES",
            Subsystem::Claim => "CLAIM",
            Subsystem::Framework => "FRAMEWORK",
        }
    }

    /// Parse a subsystem from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "MOM" => Some(Subsystem::Mom),
            "POP" => Some(Subsystem::Pop),
            "EVE" => Some(Subsystem::Eve),
            "MOSES" => Some(Subsystem::Moses),
            "CLAIM" => Some(Subsystem::Claim),
            "FRAMEWORK" => Some(Subsystem::Framework),
            _ => None,
        }
    }

    /// Kind of entity this subsystem assesses
    pub fn entity_type(&self) -> EntityType {
        match self {
            Subsystem::Mom | Subsystem::Pop => EntityType::Actor,
            Subsystem::Eve => EntityType::Evidence,
            Subsystem::Moses => EntityType::Source,
            Subsystem::Claim | Subsystem::Framework => EntityType::Claim,
        }
    }

    /// Upper bound of the subsystem's native scale
    pub fn native_max(&self) -> f64 {
        match self {
            Subsystem::Claim | Subsystem::Framework => 100.0,
            _ => 5.0,
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Subsystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid subsystem: {}", s))
    }
}

/// Kind of entity a risk signal describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// A person or organization under analysis
    Actor,
    /// An evidence item
    Evidence,
    /// An information source
    Source,
    /// A factual claim or saved claim-level analysis
    Claim,
}

impl EntityType {
    /// Get the entity type as an uppercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Actor => "ACTOR",
            EntityType::Evidence => "EVIDENCE",
            EntityType::Source => "SOURCE",
            EntityType::Claim => "CLAIM",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
