use anyhow::Context;
use shapeshifter::{Project, ProjectConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 1. 参数: [variant-index] [config.json]
    let mut args = std::env::args().skip(1);
    let variant = match args.next() {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("variant index must be a non-negative integer, got '{arg}'"))?,
        None => 0,
    };
    let config = match args.next() {
        Some(path) => ProjectConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => ProjectConfig::default(),
    };

    // 2. 构建场景
    let mut project = Project::build(&config, variant)?;

    // 3. 导出 manifest
    let path = project.export()?;
    println!("{}", path.display());

    Ok(())
}
