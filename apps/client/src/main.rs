use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_client::config::Config;
use resume_client::dashboard::fetch_dashboard;
use resume_client::extraction::ResumeUpload;
use resume_client::notice::Notice;
use resume_client::sections::{
    Awards, Certifications, CustomResumes, Educations, Experiences, Headings, Projects, Skills,
    Volunteers,
};
use resume_client::state::{AppState, Slot};

#[derive(Parser)]
#[command(name = "resume-client", version, about = "Resume builder client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionKind {
    Heading,
    Education,
    Experience,
    Project,
    Skill,
    Certification,
    Award,
    Volunteer,
    CustomResume,
}

#[derive(Subcommand)]
enum Commands {
    /// List every entry of a section
    List { section: SectionKind },
    /// Create an entry from camelCase form JSON
    Create {
        section: SectionKind,
        #[arg(long)]
        form: String,
    },
    /// Replace an entry with camelCase form JSON
    Update {
        section: SectionKind,
        id: String,
        #[arg(long)]
        form: String,
    },
    /// Delete an entry (requires --yes)
    Delete {
        section: SectionKind,
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Upload a resume PDF for extraction
    Upload {
        path: PathBuf,
        /// Save the extracted entries into the resume sections
        #[arg(long)]
        save: bool,
    },
    /// Previously uploaded resumes
    History,
    /// Entries available to a custom resume
    Elements,
    Dashboard,
    /// Rephrase an entry title with AI
    RephraseTitle {
        section: SectionKind,
        item_id: String,
        title: String,
    },
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// One page of users (1-based)
    Users {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Stats,
    /// AI calls and tokens per user
    AiUsage,
    /// PDFs generated and downloaded per user
    PdfStats,
    User { user_id: String },
    Credits { user_id: String, credits: String },
    Revoke { user_id: String },
    Unrevoke { user_id: String },
    Delete {
        user_id: String,
        #[arg(long)]
        yes: bool,
    },
    Promote { email: String },
}

enum SectionAction {
    List,
    Create { form: String },
    Update { id: String, form: String },
    Delete { id: String, yes: bool },
}

impl SectionKind {
    fn resource(self) -> &'static str {
        match self {
            SectionKind::Heading => "heading",
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Project => "project",
            SectionKind::Skill => "skill",
            SectionKind::Certification => "certification",
            SectionKind::Award => "award",
            SectionKind::Volunteer => "volunteer",
            SectionKind::CustomResume => "custom-resume",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_client={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!("Using backend at {}", config.api_base_url);
    let mut app = AppState::new(config)?;

    let notices = match cli.command {
        Commands::List { section } => dispatch(&mut app, section, SectionAction::List).await?,
        Commands::Create { section, form } => {
            dispatch(&mut app, section, SectionAction::Create { form }).await?
        }
        Commands::Update { section, id, form } => {
            dispatch(&mut app, section, SectionAction::Update { id, form }).await?
        }
        Commands::Delete { section, id, yes } => {
            dispatch(&mut app, section, SectionAction::Delete { id, yes }).await?
        }
        Commands::Upload { path, save } => upload(&app, path, save).await?,
        Commands::History => {
            print_json(&app.extractor().history().await?)?;
            Vec::new()
        }
        Commands::Elements => {
            print_json(&app.editor::<CustomResumes>().user_elements().await?)?;
            Vec::new()
        }
        Commands::Dashboard => {
            print_json(&fetch_dashboard(&app.client).await?)?;
            Vec::new()
        }
        Commands::RephraseTitle {
            section,
            item_id,
            title,
        } => {
            let rephrased = app
                .rephraser()
                .rephrase_title(section.resource(), &item_id, &title)
                .await?;
            println!("{rephrased}");
            Vec::new()
        }
        Commands::Admin { command } => admin(&mut app, command).await?,
    };

    report(&notices)
}

async fn dispatch(app: &mut AppState, kind: SectionKind, action: SectionAction) -> Result<Vec<Notice>> {
    match kind {
        SectionKind::Heading => run_section::<Headings>(app, action).await,
        SectionKind::Education => run_section::<Educations>(app, action).await,
        SectionKind::Experience => run_section::<Experiences>(app, action).await,
        SectionKind::Project => run_section::<Projects>(app, action).await,
        SectionKind::Skill => run_section::<Skills>(app, action).await,
        SectionKind::Certification => run_section::<Certifications>(app, action).await,
        SectionKind::Award => run_section::<Awards>(app, action).await,
        SectionKind::Volunteer => run_section::<Volunteers>(app, action).await,
        SectionKind::CustomResume => run_section::<CustomResumes>(app, action).await,
    }
}

async fn run_section<S>(app: &mut AppState, action: SectionAction) -> Result<Vec<Notice>>
where
    S: Slot,
    S::Record: Serialize,
    S::Form: DeserializeOwned,
{
    let editor = app.editor::<S>();
    let outcome = editor.refresh(app.take::<S>()).await;
    let mut notices = outcome.notices;
    let state = outcome.state;

    let state = match action {
        SectionAction::List => {
            print_json(&state.items)?;
            state
        }
        SectionAction::Create { form } => {
            let form: S::Form = parse_form(&form)?;
            let outcome = editor.create(state.open_create(), &form).await;
            notices.extend(outcome.notices);
            outcome.state
        }
        SectionAction::Update { id, form } => {
            let form: S::Form = parse_form(&form)?;
            let outcome = editor.update(state.open_edit(id.as_str()), &id, &form).await;
            notices.extend(outcome.notices);
            outcome.state
        }
        SectionAction::Delete { id, yes } => {
            let state = if yes { state.request_delete(id) } else { state };
            let outcome = editor.confirm_delete(state).await;
            notices.extend(outcome.notices);
            outcome.state
        }
    };

    if let Some(field_error) = &state.field_error {
        eprintln!("field: {}", field_error.field);
    }
    app.put::<S>(state);
    Ok(notices)
}

async fn upload(app: &AppState, path: PathBuf, save: bool) -> Result<Vec<Notice>> {
    let upload = ResumeUpload::from_path(&path).await?;
    let extractor = app.extractor();
    let extracted = extractor.extract(&upload).await?;
    print_json(&extracted.extracted_data)?;

    let mut notices = vec![Notice::success(format!(
        "Extracted {} entries from {}",
        extracted.extracted_data.entry_count(),
        upload.file_name
    ))];
    if save {
        let saved = extractor.save_extracted(&extracted.extracted_data).await?;
        notices.push(Notice::success(saved.message));
    }
    Ok(notices)
}

async fn admin(app: &mut AppState, command: AdminCommands) -> Result<Vec<Notice>> {
    let console = app.admin_console();
    let state = app.take_admin();

    let outcome = match command {
        AdminCommands::Users { page } => {
            let outcome = console.load_page(state, page.saturating_sub(1)).await;
            print_json(&outcome.state.users)?;
            eprintln!(
                "page {} of {} ({} users)",
                outcome.state.page + 1,
                outcome.state.page_count(),
                outcome.state.total
            );
            outcome
        }
        AdminCommands::Stats => {
            app.admin = state;
            print_json(&console.stats().await.map_err(|e| anyhow::anyhow!(e.admin_notice()))?)?;
            return Ok(Vec::new());
        }
        AdminCommands::AiUsage => {
            app.admin = state;
            print_json(&console.ai_usage().await.map_err(|e| anyhow::anyhow!(e.admin_notice()))?)?;
            return Ok(Vec::new());
        }
        AdminCommands::PdfStats => {
            app.admin = state;
            print_json(&console.pdf_stats().await.map_err(|e| anyhow::anyhow!(e.admin_notice()))?)?;
            return Ok(Vec::new());
        }
        AdminCommands::User { user_id } => {
            app.admin = state;
            let detail = console
                .user_detail(&user_id)
                .await
                .map_err(|e| anyhow::anyhow!(e.admin_notice()))?;
            print_json(&detail)?;
            return Ok(Vec::new());
        }
        AdminCommands::Credits { user_id, credits } => {
            console.update_credits(state, &user_id, &credits).await
        }
        AdminCommands::Revoke { user_id } => console.revoke(state, &user_id).await,
        AdminCommands::Unrevoke { user_id } => console.unrevoke(state, &user_id).await,
        AdminCommands::Delete { user_id, yes } => {
            let state = if yes { state.request_delete(user_id) } else { state };
            console.confirm_delete(state).await
        }
        AdminCommands::Promote { email } => console.promote(state, &email).await,
    };

    app.admin = outcome.state;
    Ok(outcome.notices)
}

fn parse_form<F: DeserializeOwned>(raw: &str) -> Result<F> {
    serde_json::from_str(raw).context("--form must be a JSON object of form fields")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(notices: &[Notice]) -> Result<()> {
    let (failures, rest): (Vec<&Notice>, Vec<&Notice>) = notices.iter().partition(|n| n.is_error());
    for notice in rest {
        eprintln!("{notice}");
    }
    if let Some(failure) = failures.first() {
        bail!("{}", failure.message);
    }
    Ok(())
}
