use std::process::Command;

pub(crate) trait CommandMemleakExt {
    fn memleak() -> Self;
}

impl CommandMemleakExt for Command {
    fn memleak() -> Self {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_memleak"));
        cmd.env_remove("RUST_LOG");
        cmd
    }
}
