use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "exercise tracker server")]
pub struct Cli {
    /// Static files served for everything outside of the api
    #[clap(long, env, default_value = "public")]
    pub assets_dir: PathBuf,
    #[clap(long, env, default_value = "exercise.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "3000")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
}
