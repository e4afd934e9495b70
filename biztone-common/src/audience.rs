//! Target audiences and their register profiles
//!
//! Every conversion targets exactly one [`Audience`]. Each audience owns a
//! fixed [`AudienceProfile`] describing who the reader is, which register to
//! write in and any extra style instruction for the rewrite.

use serde::{Deserialize, Serialize};

/// Recipient of the rewritten text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// A superior (report upward)
    #[default]
    Boss = 0,
    /// A peer (collaboration, sharing)
    Colleague = 1,
    /// A customer (service communication)
    Customer = 2,
}

/// Descriptive strings interpolated into the system instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudienceProfile {
    /// Who will read the text
    pub role: &'static str,
    /// Register and formality level
    pub register: &'static str,
    /// Additional style instruction
    pub instruction: &'static str,
}

// Indexed by `Audience as usize`.
static PROFILES: [AudienceProfile; 3] = [
    AudienceProfile {
        role: "상사(상급자)",
        register: "격식 있고 정중한 보고체의 비즈니스 한국어",
        instruction: "핵심 내용과 결론을 먼저 제시하고, 간결하고 명확한 보고 문장으로 작성하세요.",
    },
    AudienceProfile {
        role: "동료",
        register: "예의 바르고 친절한 협업체의 비즈니스 한국어",
        instruction: "협업을 요청하거나 정보를 공유하는 부드럽고 상호 존중하는 문장으로 작성하세요.",
    },
    AudienceProfile {
        role: "고객",
        register: "극존칭을 사용하는 친절한 서비스 응대체의 비즈니스 한국어",
        instruction: "고객의 입장에서 안내하고, 불편이 있었던 내용이라면 정중하게 양해를 구하는 표현을 포함하세요.",
    },
];

impl Audience {
    /// All audiences in table order
    pub const ALL: [Audience; 3] = [Audience::Boss, Audience::Colleague, Audience::Customer];

    /// Wire name used in requests and responses
    pub fn as_str(self) -> &'static str {
        match self {
            Audience::Boss => "boss",
            Audience::Colleague => "colleague",
            Audience::Customer => "customer",
        }
    }

    /// Exact, case-sensitive match against the wire names
    pub fn parse(name: &str) -> Option<Audience> {
        Self::ALL.into_iter().find(|audience| audience.as_str() == name)
    }

    /// Normalize a client-supplied `target` value
    ///
    /// Anything that is not one of the three wire names, including a missing
    /// value or a non-string, becomes [`Audience::Boss`].
    pub fn from_target(value: Option<&serde_json::Value>) -> Audience {
        value
            .and_then(serde_json::Value::as_str)
            .and_then(Audience::parse)
            .unwrap_or_default()
    }

    /// Register profile for this audience
    pub fn profile(self) -> &'static AudienceProfile {
        &PROFILES[self as usize]
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
