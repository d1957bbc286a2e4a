//! Purpose: Explicit module-handle API over the core locator and reader.
//! Exports: `Module`, `THE_ANSWER`, `ANSWER_RESOURCE`.
//! Role: Stable boundary shared by the C ABI and the CLI.
//! Invariants: The handle is plain data; nothing at this layer is process-global.
//! Invariants: Resource paths are derived per call and never cached.

use crate::core::error::{Error, ErrorKind};
use crate::core::locate::resolve_sibling;
use crate::core::read::{read_integer, ReadOutcome};

pub const THE_ANSWER: i64 = 42;
pub const ANSWER_RESOURCE: &str = "answer.dat";

pub type ApiResult<T> = Result<T, Error>;

/// Identity of a loaded module: its own file path as the host resolved it.
#[derive(Clone, Debug)]
pub struct Module {
    path: String,
}

impl Module {
    pub fn bind(path: impl Into<String>) -> ApiResult<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(Error::new(ErrorKind::Usage).with_message("module path is empty"));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The answer (which is 42). Unconditional; no file is consulted.
    pub fn get_the_answer(&self) -> i64 {
        THE_ANSWER
    }

    /// Reads the integer token from a data file next to the module's own file.
    pub fn read_resource(&self, filename: &str) -> ApiResult<ReadOutcome> {
        let resource = resolve_sibling(&self.path, filename)?;
        read_integer(&resource)
    }

    pub fn read_the_answer(&self) -> ApiResult<ReadOutcome> {
        self.read_resource(ANSWER_RESOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::{Module, ANSWER_RESOURCE, THE_ANSWER};
    use crate::core::error::ErrorKind;
    use crate::core::read::ReadOutcome;
    use std::path::Path;

    fn module_in(dir: &Path) -> Module {
        let module_path = dir.join("probe_ext.so");
        Module::bind(module_path.to_str().expect("utf8 path")).expect("bind")
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = Module::bind("").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn answer_is_constant_regardless_of_data_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = module_in(dir.path());
        // No answer.dat exists, and none is needed.
        assert_eq!(module.get_the_answer(), THE_ANSWER);

        std::fs::write(dir.path().join(ANSWER_RESOURCE), b"7").expect("write");
        assert_eq!(module.get_the_answer(), THE_ANSWER);
    }

    #[test]
    fn read_the_answer_resolves_sibling_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = module_in(dir.path());
        std::fs::write(dir.path().join(ANSWER_RESOURCE), b"42\nextra").expect("write");
        assert_eq!(
            module.read_the_answer().expect("read"),
            ReadOutcome::Value(42)
        );
    }

    #[test]
    fn read_the_answer_without_file_is_open_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = module_in(dir.path());
        let err = module.read_the_answer().expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Open);
    }

    #[test]
    fn read_the_answer_with_garbage_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = module_in(dir.path());
        std::fs::write(dir.path().join(ANSWER_RESOURCE), b"hello").expect("write");
        assert_eq!(module.read_the_answer().expect("read"), ReadOutcome::Empty);
    }

    #[test]
    fn read_resource_takes_an_arbitrary_sibling_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let module = module_in(dir.path());
        std::fs::write(dir.path().join("other.dat"), b"17").expect("write");
        assert_eq!(
            module.read_resource("other.dat").expect("read"),
            ReadOutcome::Value(17)
        );
    }

    #[test]
    fn separatorless_module_path_fails_at_read_time() {
        let module = Module::bind("probe_ext.so").expect("bind");
        let err = module.read_the_answer().expect_err("err");
        assert_eq!(err.kind(), ErrorKind::InvalidModulePath);
    }
}
