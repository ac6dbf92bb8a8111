pub mod cli;
pub mod grid;
pub mod input;

pub use self::input::IStr;

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::grid::GridExt;
    pub use crate::input::IStr;
    pub use anyhow::{anyhow, bail, ensure, Context, Result};
    pub type ArrayVec<T, const N: usize = 16> = arrayvec::ArrayVec<T, N>;
    pub use bstr::{BStr, ByteSlice};
}

/// Input processing.
///
/// Reads the file at `read_path` and leaks it so that the returned [IStr] can
/// be copied freely for the rest of the program.
pub fn input(path: &'static str, read_path: &str) -> anyhow::Result<IStr> {
    use anyhow::{anyhow, Context};
    use std::fs::File;
    use std::io::Read;

    return inner(read_path).with_context(|| anyhow!("{path}"));

    fn inner(read_path: &str) -> anyhow::Result<IStr> {
        let mut file = File::open(read_path)?;
        let mut buf = Vec::with_capacity(4096);
        file.read_to_end(&mut buf)?;
        Ok(IStr::new(Vec::leak(buf), 0))
    }
}

/// Prepare an input processor.
///
/// Evaluates to `(input, path)` where `path` is the display path used in
/// error messages.
#[macro_export]
macro_rules! input {
    ($path:literal) => {{
        let path = concat!("inputs/", $path);
        let read_path = concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/", $path);
        ($crate::input(path, read_path)?, path)
    }};
}
