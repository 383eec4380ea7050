//! The stop/continue protocol.

/// Result of a registered handler, deciding whether default traversal
/// proceeds for the node or field the handler ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    /// Skip default traversal.
    Stop,
    /// Perform default traversal.
    Continue,
    /// The handler did not say. Resolved through the engine's default-stop
    /// flag.
    #[default]
    Unspecified,
}

impl Signal {
    /// Returns true if default traversal should proceed.
    ///
    /// `Unspecified` descends unless `default_stop` is set.
    #[inline]
    pub const fn descends(self, default_stop: bool) -> bool {
        match self {
            Signal::Stop => false,
            Signal::Continue => true,
            Signal::Unspecified => !default_stop,
        }
    }
}

impl From<bool> for Signal {
    /// `true` continues, `false` stops.
    fn from(value: bool) -> Self {
        if value { Signal::Continue } else { Signal::Stop }
    }
}

impl From<Option<bool>> for Signal {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Signal::Unspecified, Signal::from)
    }
}

impl From<()> for Signal {
    fn from(_: ()) -> Self {
        Signal::Unspecified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Signal::Stop, false, false)]
    #[case(Signal::Stop, true, false)]
    #[case(Signal::Continue, false, true)]
    #[case(Signal::Continue, true, true)]
    #[case(Signal::Unspecified, false, true)]
    #[case(Signal::Unspecified, true, false)]
    fn test_descends(#[case] signal: Signal, #[case] default_stop: bool, #[case] expected: bool) {
        assert_eq!(signal.descends(default_stop), expected);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Signal::from(true), Signal::Continue);
        assert_eq!(Signal::from(false), Signal::Stop);
        assert_eq!(Signal::from(None), Signal::Unspecified);
        assert_eq!(Signal::from(Some(false)), Signal::Stop);
        assert_eq!(Signal::from(()), Signal::Unspecified);
        assert_eq!(Signal::default(), Signal::Unspecified);
    }
}
