/// A verified caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable identity subject
    pub subject: String,
    /// Display name at the time of the call
    pub name: String,
}
