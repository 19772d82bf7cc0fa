use std::fmt;

/// Authentication mechanism used for every request after the probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    Basic,
    Digest,
}

impl AuthScheme {
    /// Picks the scheme from the value of a `WWW-Authenticate` header.
    ///
    /// Any value mentioning `digest`, in any case, selects [`AuthScheme::Digest`].
    /// Everything else, including a missing header, falls back to
    /// [`AuthScheme::Basic`]. The challenge parameters are not inspected here.
    pub fn detect(challenge: Option<&str>) -> Self {
        match challenge {
            Some(value) if value.to_ascii_lowercase().contains("digest") => Self::Digest,
            _ => Self::Basic,
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => f.write_str("Basic"),
            Self::Digest => f.write_str("Digest"),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
