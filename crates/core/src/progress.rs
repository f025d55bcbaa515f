/// What an interpreter has consumed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub lines: u64,
    pub commands: u64,
    pub files: u64,
    pub dirs: u64,
    pub bytes: u64,
}
