//! Flush policy: whether mutations write the file straight away.

/// Controls when the store gets written to disk.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Save after every mutation that changed something (auto-flush).
    Immediate,
    /// Only write when you call `save()` yourself.
    #[default]
    Manual,
}

impl FlushPolicy {
    /// `true` for [`FlushPolicy::Immediate`].
    pub fn is_auto(self) -> bool {
        matches!(self, FlushPolicy::Immediate)
    }
}

impl From<bool> for FlushPolicy {
    fn from(auto_flush: bool) -> Self {
        if auto_flush {
            FlushPolicy::Immediate
        } else {
            FlushPolicy::Manual
        }
    }
}
