/// Whether to actually change anything: dry runs log what they would do instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RunType<T> {
    /// No files are written, the changes are only reported.
    DryRun(T),
    Real(T),
}

impl<T> RunType<T> {
    pub(crate) fn new(dry_run: bool, value: T) -> Self {
        if dry_run {
            Self::DryRun(value)
        } else {
            Self::Real(value)
        }
    }

    #[must_use]
    pub(crate) fn of<R>(&self, new_value: R) -> RunType<R> {
        match self {
            RunType::DryRun(_) => RunType::DryRun(new_value),
            RunType::Real(_) => RunType::Real(new_value),
        }
    }

    pub(crate) const fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun(_))
    }
}
