use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    let args = gv_volumes::args::parse();
    gv_volumes::cli::main(args)
}
