use std::io::Write;
use std::path::PathBuf;

use burrow::api::{BurrowApi, CmdMessage, MessageLevel, NodeLine, TreeLine};
use burrow::clipboard::{copy_to_clipboard, paste_from_clipboard, yank_payload};
use burrow::config::{BurrowConfig, UiMode};
use burrow::editor::edit_node;
use burrow::error::Result;
use burrow::model::{Node, NodeStatus, Tree, TreeStats, ROOT_ID};
use burrow::store::fs::FileStore;
use chrono::Utc;
use clap::Parser;
use colored::*;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: BurrowApi<FileStore>,
    config: BurrowConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context();

    match cli.command {
        Some(Commands::New { name }) => handle_messages(ctx.api.create_tree(&name)?),
        Some(Commands::Ls) => handle_ls(&ctx),
        Some(Commands::Open { name }) => handle_messages(ctx.api.open_tree(&name)?),
        Some(Commands::Rm { name, yes }) => handle_rm(&mut ctx, name, yes),
        Some(Commands::Rename { old, new }) => handle_messages(ctx.api.rename_tree(&old, &new)?),
        Some(Commands::Cp { src, dst }) => handle_messages(ctx.api.copy_tree(&src, &dst)?),

        Some(Commands::Show { depth, all }) => handle_show(&ctx, depth, all),
        Some(Commands::Path) => handle_path(&ctx),
        Some(Commands::Cat { id }) => handle_cat(&ctx, id),
        Some(Commands::Stat) => handle_stat(&ctx),
        Some(Commands::Log) => handle_log(&ctx),

        Some(Commands::Go { id }) => handle_messages(ctx.api.go(&id)?),
        Some(Commands::Up) => handle_messages(ctx.api.up()?),
        Some(Commands::Down { index }) => handle_messages(ctx.api.down(index)?),
        Some(Commands::Next) => handle_messages(ctx.api.next()?),
        Some(Commands::Prev) => handle_messages(ctx.api.prev()?),
        Some(Commands::Root) => handle_messages(ctx.api.root()?),
        Some(Commands::Back) => handle_messages(ctx.api.back()?),

        Some(Commands::Add {
            sibling,
            enter,
            title,
        }) => handle_add(&mut ctx, title.join(" "), sibling, enter),
        Some(Commands::Title { title }) => {
            handle_messages(ctx.api.set_title(None, &title.join(" "))?)
        }
        Some(Commands::Append { node, text }) => {
            handle_messages(ctx.api.append(node.as_deref(), &text.join(" "))?)
        }
        Some(Commands::Edit { id }) => handle_edit(&mut ctx, id),
        Some(Commands::Yank { id }) => handle_yank(&ctx, id),
        Some(Commands::Paste) => handle_paste(&mut ctx),
        Some(Commands::Mv { id, parent }) => handle_messages(ctx.api.move_node(&id, &parent)?),
        Some(Commands::Cpnode { id, target }) => {
            handle_messages(ctx.api.copy_node(&id, &target)?)
        }
        Some(Commands::Rmnode { id, yes }) => handle_rmnode(&mut ctx, id, yes),

        Some(Commands::Done { summary }) => {
            handle_messages(ctx.api.finish(join_opt(&summary).as_deref())?)
        }
        Some(Commands::Drop { reason }) => {
            handle_messages(ctx.api.abandon(join_opt(&reason).as_deref())?)
        }
        Some(Commands::Todo { id }) => {
            handle_messages(ctx.api.set_status(id.as_deref(), NodeStatus::Todo)?)
        }
        Some(Commands::Active { id }) => {
            handle_messages(ctx.api.set_status(id.as_deref(), NodeStatus::Active)?)
        }

        Some(Commands::Link { to, from }) => handle_messages(ctx.api.link(&to, from.as_deref())?),
        Some(Commands::Unlink { to, from }) => {
            handle_messages(ctx.api.unlink(&to, from.as_deref())?)
        }
        Some(Commands::Links { id }) => handle_listing(ctx.api.links(id.as_deref())?),
        Some(Commands::Backlinks { id }) => handle_listing(ctx.api.backlinks(id.as_deref())?),

        Some(Commands::Grep { query }) => handle_listing(ctx.api.grep(&query.join(" "))?),
        Some(Commands::FindStatus { status }) => {
            let status: NodeStatus = status.parse()?;
            handle_listing(ctx.api.find_status(status)?)
        }
        Some(Commands::FindLeaf) => handle_listing(ctx.api.find_leaves()?),
        Some(Commands::FindOrphan) => handle_listing(ctx.api.find_orphans()?),

        Some(Commands::Export { file, md }) => handle_export(&ctx, file, md),
        Some(Commands::Import { file, force }) => handle_import(&mut ctx, file, force),

        Some(Commands::Tui) => handle_tui(ctx),
        None => match ctx.config.default_mode {
            UiMode::Tui => handle_tui(ctx),
            UiMode::Cli => handle_show(&ctx, None, false),
        },
    }
}

fn init_context() -> AppContext {
    let data_dir = FileStore::default_root();
    let config = BurrowConfig::load(&data_dir);
    let api = BurrowApi::new(FileStore::new(data_dir.clone()));
    AppContext {
        api,
        config,
        data_dir,
    }
}

fn join_opt(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn handle_messages(result: burrow::api::CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_listing(result: burrow::api::CmdResult) -> Result<()> {
    print_node_lines(&result.listed_nodes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_ls(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_trees()?;
    print_trees(&result.listed_trees);
    print_messages(&result.messages);
    Ok(())
}

fn handle_rm(ctx: &mut AppContext, name: String, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete tree '{}'?", name))? {
        println!("Aborted.");
        return Ok(());
    }
    handle_messages(ctx.api.delete_tree(&name)?)
}

fn handle_show(ctx: &AppContext, depth: Option<usize>, all: bool) -> Result<()> {
    let result = ctx.api.show()?;
    if let Some(tree) = &result.snapshot {
        print_outline(tree, depth, all)?;
        print_current_detail(tree)?;
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_path(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.path()?;
    let parts: Vec<String> = result
        .listed_nodes
        .iter()
        .map(|line| {
            if line.id == ROOT_ID {
                format!("root:{}", line.title)
            } else {
                format!("{}:{}", line.id, line.title)
            }
        })
        .collect();
    println!("{}", parts.join(" → "));
    Ok(())
}

fn handle_cat(ctx: &AppContext, id: Option<String>) -> Result<()> {
    let result = ctx.api.cat(id.as_deref())?;
    match result.text.as_deref() {
        Some(body) if !body.is_empty() => println!("{}", body),
        _ => println!("{}", "(empty)".dimmed()),
    }
    Ok(())
}

fn handle_stat(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stat()?;
    if let Some(tree) = &result.snapshot {
        print_stats(tree);
    }
    Ok(())
}

fn handle_log(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.log()?;
    println!("\n{}", "Navigation History".bold());
    println!("{}", rule());
    for (i, line) in result.listed_nodes.iter().enumerate() {
        let marker = if i + 1 == result.listed_nodes.len() {
            " ← current"
        } else {
            ""
        };
        println!(
            "{}. {} {}{}",
            i + 1,
            format!("[{}]", line.id).dimmed(),
            line.title,
            marker.magenta()
        );
    }
    Ok(())
}

fn handle_add(ctx: &mut AppContext, title: String, sibling: bool, enter: bool) -> Result<()> {
    let result = ctx.api.add(None, &title, sibling)?;
    print_messages(&result.messages);
    if enter {
        if let Some(id) = result.text {
            let moved = ctx.api.go(&id)?;
            print_messages(&moved.messages);
        }
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: Option<String>) -> Result<()> {
    let tree = ctx.api.current_tree()?;
    let node = match id.as_deref() {
        Some(id) => tree.get(id)?.clone(),
        None => tree.current_node().clone(),
    };
    let draft = edit_node(&node, &ctx.config)?;
    let result = ctx.api.edit_apply(Some(&node.id), draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_yank(ctx: &AppContext, id: Option<String>) -> Result<()> {
    let tree = ctx.api.current_tree()?;
    let node = match id.as_deref() {
        Some(id) => tree.get(id)?,
        None => tree.current_node(),
    };
    copy_to_clipboard(&yank_payload(&node.title, &node.body))?;
    println!("{}", format!("Copied [{}] to clipboard", node.id).green());
    Ok(())
}

fn handle_paste(ctx: &mut AppContext) -> Result<()> {
    let text = paste_from_clipboard()?;
    handle_messages(ctx.api.append(None, &text)?)
}

fn handle_rmnode(ctx: &mut AppContext, id: Option<String>, yes: bool) -> Result<()> {
    if !yes {
        let tree = ctx.api.current_tree()?;
        let target = match id.as_deref() {
            Some(id) => id.to_string(),
            None => tree.current.clone(),
        };
        let count = tree.subtree_ids(&target)?.len();
        let prompt = format!("Delete [{}] and {} descendant(s)?", target, count - 1);
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(());
        }
    }
    handle_messages(ctx.api.remove_node(id.as_deref())?)
}

fn handle_export(ctx: &AppContext, file: Option<String>, md: bool) -> Result<()> {
    let result = ctx.api.export(md)?;
    let text = result.text.unwrap_or_default();
    match file {
        Some(path) => {
            std::fs::write(&path, &text)?;
            println!("{}", format!("Exported to {}", path).green());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: String, force: bool) -> Result<()> {
    let content = std::fs::read_to_string(&file)?;
    handle_messages(ctx.api.import(&content, force)?)
}

fn handle_tui(ctx: AppContext) -> Result<()> {
    let AppContext {
        api,
        config,
        data_dir,
    } = ctx;
    burrow::ui::run(api, config, &data_dir)
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn rule() -> ColoredString {
    "─".repeat(60).dimmed()
}

fn status_icon(status: NodeStatus) -> ColoredString {
    match status {
        NodeStatus::Active => status.icon().green(),
        NodeStatus::Done => status.icon().blue(),
        NodeStatus::Dropped => status.icon().red(),
        NodeStatus::Todo => status.icon().yellow(),
    }
}

fn node_label(node: &Node, current_id: &str) -> String {
    let mut label = format!(
        "{} {} {}",
        format!("[{}]", node.id).dimmed(),
        status_icon(node.status),
        node.title
    );
    if node.id == current_id {
        label.push_str(&" ← HERE".magenta().bold().to_string());
    }
    label
}

fn print_node_lines(lines: &[NodeLine]) {
    for line in lines {
        println!(
            "{} {} {}",
            format!("[{}]", line.id).dimmed(),
            status_icon(line.status),
            line.title
        );
    }
}

fn status_counts(stats: &TreeStats) -> String {
    let mut parts = Vec::new();
    if stats.done > 0 {
        parts.push(format!("{} done", stats.done));
    }
    if stats.todo > 0 {
        parts.push(format!("{} todo", stats.todo));
    }
    if stats.active > 0 {
        parts.push(format!("{} active", stats.active));
    }
    if stats.dropped > 0 {
        parts.push(format!("{} dropped", stats.dropped));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("[{}]", parts.join(", "))
    }
}

fn print_outline(tree: &Tree, max_depth: Option<usize>, show_all: bool) -> Result<()> {
    let stats = tree.statistics();
    println!("{}  {}", tree.name.bold(), status_counts(&stats).dimmed());

    let root = tree.get(ROOT_ID)?;
    let mut root_line = format!("{} {}", "root:".dimmed(), root.title.bold());
    if tree.current == ROOT_ID {
        root_line.push_str(&" ← HERE".magenta().bold().to_string());
    }
    println!("{}", root_line);

    let count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        print_outline_node(tree, child, "", i + 1 == count, 1, max_depth, show_all)?;
    }
    Ok(())
}

fn print_outline_node(
    tree: &Tree,
    id: &str,
    prefix: &str,
    is_last: bool,
    depth: usize,
    max_depth: Option<usize>,
    show_all: bool,
) -> Result<()> {
    let node = tree.get(id)?;
    let connector = if is_last { "└── " } else { "├── " };
    println!(
        "{}{}{}",
        prefix.dimmed(),
        connector.dimmed(),
        node_label(node, &tree.current)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    if show_all && !node.body.is_empty() {
        for line in node.body.lines() {
            println!("{}{}", child_prefix.dimmed(), line.dimmed());
        }
    }

    if let Some(limit) = max_depth {
        if depth >= limit {
            return Ok(());
        }
    }
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        print_outline_node(tree, child, &child_prefix, i + 1 == count, depth + 1, max_depth, show_all)?;
    }
    Ok(())
}

fn print_current_detail(tree: &Tree) -> Result<()> {
    let node = tree.current_node();
    println!("{}", rule());
    println!(
        "{} {} {}",
        format!("[{}]", node.id).dimmed(),
        node.title.bold(),
        format!("({})", node.status).dimmed()
    );

    if !node.body.is_empty() {
        println!("\n{}\n", node.body);
    }

    let links = tree.links_of(&node.id)?;
    if !links.is_empty() {
        let parts: Vec<String> = links
            .iter()
            .map(|n| format!("{} {}", format!("[{}]", n.id).cyan(), n.title))
            .collect();
        println!("{}{}", "→ Links: ".dimmed(), parts.join(", "));
    }
    let backlinks = tree.backlinks_of(&node.id)?;
    if !backlinks.is_empty() {
        let parts: Vec<String> = backlinks
            .iter()
            .map(|n| format!("{} {}", format!("[{}]", n.id).cyan(), n.title))
            .collect();
        println!("{}{}", "← Backlinks: ".dimmed(), parts.join(", "));
    }

    let mut nav = Vec::new();
    if let Some(parent) = &node.parent {
        nav.push(format!("↑ parent: {}", parent));
        let siblings: Vec<&str> = tree
            .get(parent)?
            .children
            .iter()
            .filter(|c| *c != &node.id)
            .map(|c| c.as_str())
            .collect();
        if !siblings.is_empty() {
            nav.push(format!("↔ siblings: {}", siblings.join(", ")));
        }
    }
    if node.children.is_empty() {
        nav.push("↓ children: (none)".to_string());
    } else {
        nav.push(format!("↓ children: {}", node.children.join(", ")));
    }
    println!("{}", nav.join("  ").dimmed());
    println!("{}", rule());
    Ok(())
}

fn print_stats(tree: &Tree) {
    let stats = tree.statistics();
    println!("\n{} Statistics", tree.name.bold());
    println!("{}", rule());
    println!("Total nodes: {}", stats.total);
    println!("  {} Active: {}", "►".green(), stats.active);
    println!("  {} Done: {}", "✓".blue(), stats.done);
    println!("  {} Dropped: {}", "✗".red(), stats.dropped);
    println!("  {} Todo: {}", "?".yellow(), stats.todo);
    println!("Leaf nodes: {}", stats.leaves);
    println!("Max depth: {}", stats.max_depth);
}

const NAME_WIDTH: usize = 28;
const TIME_WIDTH: usize = 14;

fn print_trees(trees: &[TreeLine]) {
    for line in trees {
        let marker = if line.is_current {
            "► ".green()
        } else {
            "  ".normal()
        };
        let name = truncate_to_width(&line.name, NAME_WIDTH);
        let padding = NAME_WIDTH.saturating_sub(name.width());
        let name_colored = if line.is_current {
            name.green().bold()
        } else {
            name.normal()
        };
        let nodes = format!("{:>10}", format!("{} node(s)", line.nodes));
        println!(
            "{}{}{}{}{}",
            marker,
            name_colored,
            " ".repeat(padding),
            nodes.dimmed(),
            format_time_ago(line.updated).dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    let time_str = time_str
        .replace("hour ago", "hour  ago")
        .replace("minute ago", "minute  ago")
        .replace("second ago", "second  ago")
        .replace("day ago", "day  ago")
        .replace("week ago", "week  ago")
        .replace("month ago", "month  ago")
        .replace("year ago", "year  ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
