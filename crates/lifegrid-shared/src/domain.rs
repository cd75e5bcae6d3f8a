use serde::Serialize;

/// Opaque icon carried by each domain.
/// Front-ends render it the same way for
/// every domain.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  PartialEq,
  Eq,
)]
#[serde(transparent)]
pub struct DomainIcon(&'static str);

impl DomainIcon {
  pub const fn new(
    glyph: &'static str
  ) -> Self {
    Self(glyph)
  }

  pub fn glyph(&self) -> &'static str {
    self.0
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  PartialEq,
  Eq,
)]
pub struct Domain {
  pub id:   &'static str,
  pub name: &'static str,
  pub icon: DomainIcon
}

/// Grid columns, left to right.
pub const LIFE_DOMAINS: &[Domain] = &[
  Domain {
    id:   "spiritual",
    name: "Spiritual",
    icon: DomainIcon::new("🕊")
  },
  Domain {
    id:   "health",
    name: "Health",
    icon: DomainIcon::new("❤")
  },
  Domain {
    id:   "family",
    name: "Family",
    icon: DomainIcon::new("🏠")
  },
  Domain {
    id:   "social",
    name: "Social",
    icon: DomainIcon::new("👥")
  },
  Domain {
    id:   "career",
    name: "Career",
    icon: DomainIcon::new("💼")
  },
  Domain {
    id:   "finance",
    name: "Finance",
    icon: DomainIcon::new("💰")
  },
  Domain {
    id:   "personal",
    name: "Personal Growth",
    icon: DomainIcon::new("📚")
  },
  Domain {
    id:   "recreation",
    name: "Recreation",
    icon: DomainIcon::new("🎨")
  }
];

pub fn find_domain(
  id: &str
) -> Option<&'static Domain> {
  LIFE_DOMAINS
    .iter()
    .find(|domain| domain.id == id)
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeSet;

  use super::*;

  #[test]
  fn domain_ids_are_unique() {
    let ids: BTreeSet<&str> = LIFE_DOMAINS
      .iter()
      .map(|domain| domain.id)
      .collect();
    assert_eq!(ids.len(), LIFE_DOMAINS.len());
  }

  #[test]
  fn finds_known_domains_only() {
    assert_eq!(
      find_domain("career").map(|d| d.name),
      Some("Career")
    );
    assert!(find_domain("Career").is_none());
    assert!(find_domain("").is_none());
  }
}
