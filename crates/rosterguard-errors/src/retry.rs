/// Whether the *caller* may retry. Nothing in rosterguard retries internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RetryClass {
    None,
    AfterDelay,
    Transient,
}

impl RetryClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            RetryClass::None => "none",
            RetryClass::AfterDelay => "after_delay",
            RetryClass::Transient => "transient",
        }
    }
}
