//! Command-line picker: load a page, select an element, print what the
//! panel would show.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use chardow::codegen::MarkupFlavor;
use chardow::dom::extract::TreeExtractor;
use chardow::engine::{Inspector, Selection};
use chardow::net::download::save_all;

/// Point at a rendered element, get JSX + Tailwind back.
#[derive(Parser, Debug)]
#[command(name = "chardow")]
#[command(about = "Point at a rendered element, get JSX + Tailwind back")]
#[command(version)]
struct Cli {
    /// Page URL or local HTML file
    source: String,

    /// CSS selector of the element to pick
    selector: String,

    /// What to print
    #[arg(long, value_enum, default_value_t = View::Code)]
    view: View,

    /// Component name for the JSX output
    #[arg(long)]
    component: Option<String>,

    /// Skip the subtree rooted at this element id
    #[arg(long)]
    exclude_id: Option<String>,

    /// Save the selection's svg/img assets into this directory
    #[arg(long)]
    download: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Code,
    Html,
    Classes,
    Logic,
    Type,
    Assets,
    All,
}

fn print_section(title: &str, body: &str, with_header: bool) {
    if with_header {
        println!("─── {} ───", title);
    }
    println!("{}", body);
    if with_header {
        println!();
    }
}

fn render(inspector: &Inspector, selection: &Selection, view: View) {
    let all = view == View::All;

    if all || view == View::Code {
        print_section("Code", &inspector.component(selection), all);
    }
    if all || view == View::Html {
        print_section("HTML", &selection.markup(MarkupFlavor::Html), all);
    }
    if all || view == View::Classes {
        print_section("Classes", &selection.utility_classes().join(" "), all);
    }
    if all || view == View::Logic {
        print_section("Logic", &selection.logic(), all);
    }
    if all || view == View::Type {
        let typography = selection.typography();
        let rows: Vec<String> = typography
            .rows()
            .iter()
            .map(|(label, value)| format!("{:<15} {}", label, value))
            .collect();
        print_section("Type", &rows.join("\n"), all);
    }
    if all || view == View::Assets {
        let assets = selection.assets();
        let body = if assets.is_empty() {
            "No assets found.".to_string()
        } else {
            assets
                .iter()
                .enumerate()
                .map(|(i, asset)| format!("{:>3}. [{}] {}", i + 1, asset.kind_label(), asset.display_name()))
                .collect::<Vec<_>>()
                .join("\n")
        };
        print_section("Assets", &body, all);
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let mut extractor = TreeExtractor::new();
    if let Some(id) = &cli.exclude_id {
        extractor = extractor.with_exclusion_id(id.clone());
    }
    let mut inspector = Inspector::new().with_extractor(extractor);
    if let Some(name) = &cli.component {
        inspector = inspector.with_component_name(name.clone());
    }

    let page = match inspector.load(&cli.source) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let selection = match inspector.select(&page, &cli.selector) {
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    render(&inspector, &selection, cli.view);

    if let Some(dir) = &cli.download {
        let mut failed = false;
        for result in save_all(&selection.assets(), &selection.page_url, dir) {
            match result {
                Ok(saved) => eprintln!("saved {} ({} bytes)", saved.path.display(), saved.bytes),
                Err(e) => {
                    eprintln!("{}", e);
                    failed = true;
                }
            }
        }
        if failed {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "chardow",
            "page.html",
            ".card",
            "--view",
            "all",
            "--component",
            "Card",
            "--download",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.source, "page.html");
        assert_eq!(cli.selector, ".card");
        assert_eq!(cli.view, View::All);
        assert_eq!(cli.component.as_deref(), Some("Card"));
        assert_eq!(cli.exclude_id, None);
        assert_eq!(cli.download, Some(PathBuf::from("out")));
    }

    #[test]
    fn defaults_to_code_view() {
        let cli = Cli::try_parse_from(["chardow", "page.html", "div", "--exclude-id", "nav"]).unwrap();
        assert_eq!(cli.view, View::Code);
        assert_eq!(cli.exclude_id.as_deref(), Some("nav"));
        assert_eq!(cli.component, None);
    }

    #[test]
    fn rejects_bad_input() {
        let err = Cli::try_parse_from(["chardow", "page.html"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(["chardow", "page.html", "div", "--view", "pixels"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let err = Cli::try_parse_from(["chardow", "page.html", "div", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        assert!(Cli::try_parse_from(["chardow", "page.html", "div", "--view"]).is_err());
    }

    #[test]
    fn help_lists_views() {
        let err = Cli::try_parse_from(["chardow", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let help = err.to_string();
        assert!(help.contains("--view"));
        assert!(help.contains("assets"));
    }
}
