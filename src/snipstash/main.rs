use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use snipstash::action::{Action, SnippetPatch, TagDelta};
use snipstash::collection::Collection;
use snipstash::config::StashConfig;
use snipstash::error::{Result, StashError};
use snipstash::export;
use snipstash::model::{Language, Snippet, Visibility};
use snipstash::session::{CmdMessage, MessageLevel, Session};
use snipstash::store::fs::FileStore;
use snipstash::view::{SortMode, ViewFilter};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn version_string() -> String {
    let hash = env!("GIT_HASH");
    let date = env!("GIT_COMMIT_DATE");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{} ({} {})", env!("CARGO_PKG_VERSION"), hash, date)
    }
}

struct AppContext {
    session: Session<FileStore>,
    config: StashConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Add {
            name,
            code,
            file,
            lang,
            tags,
            visibility,
        }) => handle_add(&mut ctx, name, code, file, lang, tags, visibility),
        Some(Commands::List {
            search,
            lang,
            tag,
            visibility,
            archived,
            sort,
        }) => handle_list(&ctx, search, lang, tag, visibility, archived, sort),
        Some(Commands::Show { snippet }) => handle_show(&mut ctx, snippet),
        Some(Commands::Edit {
            snippet,
            name,
            code,
            file,
            lang,
            tags,
            visibility,
            message,
        }) => handle_edit(&mut ctx, snippet, name, code, file, lang, tags, visibility, message),
        Some(Commands::Delete { snippets }) => handle_delete(&mut ctx, snippets),
        Some(Commands::Archive { snippets }) => handle_archive(&mut ctx, snippets, true),
        Some(Commands::Restore { snippets }) => handle_archive(&mut ctx, snippets, false),
        Some(Commands::Tag {
            snippets,
            add,
            remove,
        }) => handle_tag(&mut ctx, snippets, add, remove),
        Some(Commands::Collab {
            snippet,
            add,
            remove,
        }) => handle_collab(&mut ctx, snippet, add, remove),
        Some(Commands::History { snippet }) => handle_history(&ctx, snippet),
        Some(Commands::Search { term }) => {
            handle_list(&ctx, Some(term), None, Vec::new(), None, false, None)
        }
        Some(Commands::Export { snippets, output }) => handle_export(&ctx, snippets, output),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, None, None, Vec::new(), None, false, None),
    }
}

fn init_context() -> Result<AppContext> {
    // SNIPSTASH_HOME overrides the platform data dir (used by tests).
    let data_dir = match std::env::var_os("SNIPSTASH_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "snipstash", "snipstash")
            .ok_or_else(|| StashError::Store("Could not determine data directory".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = StashConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(data_dir.clone());
    let (session, startup) = Session::open(store);
    print_messages(&startup);

    Ok(AppContext {
        session,
        config,
        data_dir,
    })
}

fn handle_add(
    ctx: &mut AppContext,
    name: String,
    code: Option<String>,
    file: Option<PathBuf>,
    lang: Option<String>,
    tags: Vec<String>,
    visibility: Option<String>,
) -> Result<()> {
    let code = read_code(code, file)?;
    let language = match lang {
        Some(s) => parse_language(&s),
        None => ctx.config.default_language.clone(),
    };
    let visibility = match visibility {
        Some(s) => parse_visibility(&s)?,
        None => ctx.config.default_visibility,
    };

    let snippet = Snippet::new(name, code, language, ctx.config.owner.clone())
        .with_tags(tags)
        .with_visibility(visibility);
    let short_id = short_id(&snippet.id);
    let snippet_name = snippet.name.clone();

    let messages = ctx.session.dispatch(Action::Add(snippet));
    print_messages(&messages);
    print_messages(&[CmdMessage::success(format!(
        "Snippet added ({}): {}",
        short_id, snippet_name
    ))]);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    lang: Option<String>,
    tags: Vec<String>,
    visibility: Option<String>,
    archived: bool,
    sort: Option<String>,
) -> Result<()> {
    let filter = ViewFilter {
        search,
        language: lang.map(|s| parse_language(&s)),
        tags,
        visibility: visibility.map(|s| parse_visibility(&s)).transpose()?,
        include_archived: archived,
        sort: sort
            .map(|s| {
                s.parse::<SortMode>()
                    .map_err(StashError::Api)
            })
            .transpose()?
            .unwrap_or_default(),
    };

    let listed = ctx.session.view(&filter);
    print_snippets(&listed, ctx.session.collection().active);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, input: String) -> Result<()> {
    let id = resolve_snippet(ctx.session.collection(), &input)?;
    let messages = ctx.session.dispatch(Action::MarkUsed { id });

    let snippet = ctx
        .session
        .collection()
        .get(&id)
        .ok_or_else(|| StashError::Api(format!("Snippet disappeared: {}", id)))?;

    println!(
        "{} {}  {}",
        short_id(&snippet.id).dimmed(),
        snippet.name.bold(),
        format!("[{}]", snippet.language.display_name()).cyan()
    );
    if !snippet.tags.is_empty() {
        println!("{}", format!("tags: {}", snippet.tags.join(", ")).dimmed());
    }
    println!(
        "{}",
        format!("{} lines, used {} times", snippet.line_count(), snippet.use_count).dimmed()
    );
    println!("--------------------------------");
    println!("{}", snippet.code);

    print_messages(&messages);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_edit(
    ctx: &mut AppContext,
    input: String,
    name: Option<String>,
    code: Option<String>,
    file: Option<PathBuf>,
    lang: Option<String>,
    tags: Option<Vec<String>>,
    visibility: Option<String>,
    message: Option<String>,
) -> Result<()> {
    let id = resolve_snippet(ctx.session.collection(), &input)?;

    let code = match (code, file) {
        (None, None) => None,
        (code, file) => Some(read_code(code, file)?),
    };

    let patch = SnippetPatch {
        name,
        code,
        language: lang.map(|s| parse_language(&s)),
        tags,
        visibility: visibility.map(|s| parse_visibility(&s)).transpose()?,
        message,
        author: Some(ctx.config.owner.clone()),
    };

    if patch.is_empty() {
        return Err(StashError::Api("Nothing to change".to_string()));
    }

    let messages = ctx.session.dispatch(Action::Update { id, patch });
    print_messages(&messages);
    print_messages(&[CmdMessage::success(format!(
        "Snippet updated ({})",
        short_id(&id)
    ))]);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, inputs: Vec<String>) -> Result<()> {
    for input in inputs {
        let id = resolve_snippet(ctx.session.collection(), &input)?;
        let name = ctx
            .session
            .collection()
            .get(&id)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        let messages = ctx.session.dispatch(Action::Delete { id });
        print_messages(&messages);
        print_messages(&[CmdMessage::success(format!(
            "Snippet deleted ({}): {}",
            short_id(&id),
            name
        ))]);
    }
    Ok(())
}

fn handle_archive(ctx: &mut AppContext, inputs: Vec<String>, archive: bool) -> Result<()> {
    for input in inputs {
        let id = resolve_snippet(ctx.session.collection(), &input)?;
        let action = if archive {
            Action::Archive { id }
        } else {
            Action::Restore { id }
        };
        let messages = ctx.session.dispatch(action);
        print_messages(&messages);

        let verb = if archive { "archived" } else { "restored" };
        print_messages(&[CmdMessage::success(format!(
            "Snippet {} ({})",
            verb,
            short_id(&id)
        ))]);
    }
    Ok(())
}

fn handle_tag(
    ctx: &mut AppContext,
    inputs: Vec<String>,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<()> {
    if add.is_empty() && remove.is_empty() {
        return Err(StashError::Api("No tags specified".to_string()));
    }

    let mut ids = Vec::with_capacity(inputs.len());
    for input in &inputs {
        ids.push(resolve_snippet(ctx.session.collection(), input)?);
    }

    let count = ids.len();
    let messages = ctx.session.dispatch(Action::BulkTag {
        ids,
        delta: TagDelta { add, remove },
    });
    print_messages(&messages);
    print_messages(&[CmdMessage::success(format!(
        "Tags updated on {} snippet{}",
        count,
        if count == 1 { "" } else { "s" }
    ))]);
    Ok(())
}

fn handle_collab(
    ctx: &mut AppContext,
    input: String,
    add: Option<String>,
    remove: Option<String>,
) -> Result<()> {
    let id = resolve_snippet(ctx.session.collection(), &input)?;

    let snippet = ctx
        .session
        .collection()
        .get(&id)
        .ok_or_else(|| StashError::Api(format!("Snippet disappeared: {}", id)))?;
    if snippet.visibility != Visibility::Team {
        // The reducer would silently refuse; tell the user why.
        print_messages(&[CmdMessage::info(format!(
            "Snippet '{}' is {}; collaborators apply to team snippets only",
            snippet.name, snippet.visibility
        ))]);
        return Ok(());
    }

    let action = match (add, remove) {
        (Some(user), None) => Action::AddCollaborator { id, user },
        (None, Some(user)) => Action::RemoveCollaborator { id, user },
        _ => {
            return Err(StashError::Api(
                "Use exactly one of --add or --remove".to_string(),
            ))
        }
    };

    let messages = ctx.session.dispatch(action);
    print_messages(&messages);

    let collaborators = ctx
        .session
        .collection()
        .get(&id)
        .map(|s| s.collaborators.join(", "))
        .unwrap_or_default();
    print_messages(&[CmdMessage::success(format!(
        "Collaborators: [{}]",
        collaborators
    ))]);
    Ok(())
}

fn handle_history(ctx: &AppContext, input: String) -> Result<()> {
    let id = resolve_snippet(ctx.session.collection(), &input)?;
    let snippet = ctx
        .session
        .collection()
        .get(&id)
        .ok_or_else(|| StashError::Api(format!("Snippet disappeared: {}", id)))?;

    if snippet.versions.is_empty() {
        println!("No versions recorded for '{}'.", snippet.name);
        return Ok(());
    }

    println!(
        "{} version{} of {}",
        snippet.versions.len(),
        if snippet.versions.len() == 1 { "" } else { "s" },
        snippet.name.bold()
    );
    for (i, version) in snippet.versions.iter().enumerate() {
        println!(
            "\n{} {} {} {}",
            format!("v{}", i + 1).yellow(),
            version.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            version.author.cyan(),
            version.message
        );
        for line in version.code.lines() {
            println!("    {}", line);
        }
    }
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    inputs: Vec<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let collection = ctx.session.collection();
    let snippets: Vec<Snippet> = if inputs.is_empty() {
        collection
            .snippets
            .iter()
            .filter(|s| !s.is_archived)
            .cloned()
            .collect()
    } else {
        let mut picked = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let id = resolve_snippet(collection, input)?;
            if let Some(s) = collection.get(&id) {
                picked.push(s.clone());
            }
        }
        picked
    };

    if snippets.is_empty() {
        print_messages(&[CmdMessage::info("No snippets to export.")]);
        return Ok(());
    }

    let path = output.unwrap_or_else(|| PathBuf::from(export::default_filename()));
    let file = std::fs::File::create(&path).map_err(StashError::Io)?;
    export::write_archive(file, &snippets)?;

    print_messages(&[CmdMessage::success(format!(
        "Exported {} snippet{} to {}",
        snippets.len(),
        if snippets.len() == 1 { "" } else { "s" },
        path.display()
    ))]);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!("owner = {}", ctx.config.owner);
            println!("default-language = {}", ctx.config.default_language);
            println!("default-visibility = {}", ctx.config.default_visibility);
        }
        (Some("owner"), None) => println!("owner = {}", ctx.config.owner),
        (Some("owner"), Some(v)) => {
            ctx.config.owner = v;
            ctx.config.save(&ctx.data_dir)?;
            print_messages(&[CmdMessage::success("Config saved")]);
        }
        (Some("default-language"), None) => {
            println!("default-language = {}", ctx.config.default_language)
        }
        (Some("default-language"), Some(v)) => {
            ctx.config.default_language = parse_language(&v);
            ctx.config.save(&ctx.data_dir)?;
            print_messages(&[CmdMessage::success("Config saved")]);
        }
        (Some("default-visibility"), None) => {
            println!("default-visibility = {}", ctx.config.default_visibility)
        }
        (Some("default-visibility"), Some(v)) => {
            ctx.config.default_visibility = parse_visibility(&v)?;
            ctx.config.save(&ctx.data_dir)?;
            print_messages(&[CmdMessage::success("Config saved")]);
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

// --- Input helpers ---

fn read_code(code: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (code, file) {
        (Some(code), None) => Ok(code),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(StashError::Io),
        (None, None) => Ok(String::new()),
        (Some(_), Some(_)) => Err(StashError::Api(
            "Use either --code or --file, not both".to_string(),
        )),
    }
}

fn parse_language(s: &str) -> Language {
    // Parsing never fails; unknown names become Language::Other.
    s.parse().unwrap_or_default()
}

fn parse_visibility(s: &str) -> Result<Visibility> {
    s.parse().map_err(StashError::Api)
}

/// Resolve user input to a snippet id: UUID first, then exact name
/// (case-insensitive), then partial name match.
fn resolve_snippet(collection: &Collection, input: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        if collection.contains(&id) {
            return Ok(id);
        }
        return Err(StashError::Api(format!("No snippet with id {}", id)));
    }

    let needle = input.to_lowercase();

    if let Some(s) = collection
        .snippets
        .iter()
        .find(|s| s.name.to_lowercase() == needle)
    {
        return Ok(s.id);
    }

    if let Some(s) = collection
        .snippets
        .iter()
        .find(|s| s.name.to_lowercase().contains(&needle))
    {
        return Ok(s.id);
    }

    Err(StashError::Api(format!(
        "No snippet matching '{}'",
        input
    )))
}

fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

// --- Output helpers ---

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ACTIVE_MARKER: &str = "▸";

fn print_snippets(snippets: &[Snippet], active: Option<Uuid>) {
    if snippets.is_empty() {
        println!("No snippets found.");
        return;
    }

    for snippet in snippets {
        let marker = if active == Some(snippet.id) {
            format!("{} ", ACTIVE_MARKER)
        } else {
            "  ".to_string()
        };

        let id_str = format!("{}  ", short_id(&snippet.id));
        let lang = format!("[{}]", snippet.language.display_name());
        let tags = if snippet.tags.is_empty() {
            String::new()
        } else {
            format!("  #{}", snippet.tags.join(" #"))
        };
        let archived = if snippet.is_archived { "  (archived)" } else { "" };

        let body = format!("{} {}{}{}", snippet.name, lang, tags, archived);

        let fixed_width = marker.width() + id_str.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let body_display = truncate_to_width(&body, available);
        let padding = available.saturating_sub(body_display.width());

        let time_ago = format_time_ago(snippet.updated_at);

        println!(
            "{}{}{}{}{}",
            marker.yellow(),
            id_str.dimmed(),
            if snippet.is_archived {
                body_display.red()
            } else {
                body_display.normal()
            },
            " ".repeat(padding),
            time_ago.dimmed()
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

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
