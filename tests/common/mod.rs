mod cli_utils;

pub(crate) use self::cli_utils::CommandMemleakExt;
