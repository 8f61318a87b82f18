/// Release notes with no problems, in the layout every release uses.
pub(crate) const SCIPY_1_5_2: &str = include_str!("1.5.2-notes.rst");
