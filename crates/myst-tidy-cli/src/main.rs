use anyhow::Result;
use myst_tidy_config::Config;
use myst_tidy_engine::{add_frontmatter, balance_admonitions, chapter_id, io, strip_frontmatter};
use relative_path::RelativePathBuf;
use std::{env, path::PathBuf, process};

#[derive(Debug, Clone, Copy)]
enum Command {
    FixAdmonitions,
    AddFrontmatter,
    StripFrontmatter,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <command> [--dry-run] [content-dir]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  fix-admonitions    Align admonition closing fences with their openers");
    eprintln!("  add-frontmatter    Add export front matter to content files");
    eprintln!("  strip-frontmatter  Remove front matter from content files");
    eprintln!();
    eprintln!("The content directory is taken from the argument, or else from");
    eprintln!("the config file at {}", Config::config_path().display());
    process::exit(1);
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut dry_run = args.iter().any(|a| a == "--dry-run");
    args.retain(|a| a != "--dry-run");

    let command = match args.first().map(String::as_str) {
        Some("fix-admonitions") => Command::FixAdmonitions,
        Some("add-frontmatter") => Command::AddFrontmatter,
        Some("strip-frontmatter") => Command::StripFrontmatter,
        _ => usage(&program),
    };
    if args.len() > 2 {
        usage(&program);
    }

    // Determine content path from CLI args or config file
    let content_path;
    let from_config;
    let mut extensions = Config::default_extensions();

    if let Some(arg) = args.get(1) {
        content_path = PathBuf::from(arg);
        from_config = false;
    } else {
        match Config::load() {
            Ok(Some(config)) => {
                content_path = config.content_path;
                dry_run = dry_run || config.dry_run;
                extensions = config.extensions;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No content directory provided and no config file found");
                usage(&program);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                usage(&program);
            }
        }
    }

    if let Err(e) = io::validate_content_dir(&content_path) {
        let source = if from_config {
            format!(" from config file '{}'", Config::config_path().display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Content path '{}'{} is invalid: {e}",
            content_path.display(),
            source
        );
        process::exit(1);
    }

    let files = io::scan_content_files(&content_path, &extensions)?;

    let mut fixed_count = 0;
    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_path = RelativePathBuf::from(&file_name);

        let changed = match command {
            Command::FixAdmonitions => {
                io::rewrite_file(&relative_path, &content_path, dry_run, balance_admonitions)?
            }
            Command::StripFrontmatter => {
                io::rewrite_file(&relative_path, &content_path, dry_run, strip_frontmatter)?
            }
            Command::AddFrontmatter => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let chapter = chapter_id(&stem);
                io::rewrite_file(&relative_path, &content_path, dry_run, |text| {
                    add_frontmatter(text, &chapter)
                })?
            }
        };

        if changed {
            if dry_run {
                println!("Would fix: {}", path.display());
            } else {
                println!("Fixed: {}", path.display());
            }
            fixed_count += 1;
        }
    }

    let verb = if dry_run { "Would fix" } else { "Fixed" };
    println!("\n{verb} {fixed_count} file(s)");

    Ok(())
}
