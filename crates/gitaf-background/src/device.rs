//! Device classification
//!
//! A user-agent heuristic, not a capability probe: a desktop without
//! WebGL is still classified `Desktop` and fails later at context
//! acquisition.

/// Device class decided once per mount
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Phones and tablets: CSS fallback only
    Mobile,
    /// Everything else: shader background
    Desktop,
}

impl DeviceClass {
    /// Classify a device signal against known mobile platform identifiers
    ///
    /// Matching is a case-insensitive substring search.
    pub fn classify<S: AsRef<str>>(signal: &str, mobile_identifiers: &[S]) -> Self {
        let signal = signal.to_lowercase();
        let is_mobile = mobile_identifiers
            .iter()
            .map(|id| id.as_ref())
            .filter(|id| !id.is_empty())
            .any(|id| signal.contains(&id.to_lowercase()));

        if is_mobile {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Get the string ID for this class
    pub fn id(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Desktop => "desktop",
        }
    }
}
