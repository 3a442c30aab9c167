use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use quizreel_core::{
    PostgrestStore, Provider, ProviderGenerator, QuizReelError, RecordId, Settings, VideoPipeline,
    catalog, format_video_readable,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status for a course that has no questions.
const EXIT_NO_CONTENT: i32 = 2;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    #[default]
    Gemini,
    Openai,
    Grok,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Gemini => Provider::Gemini,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Grok => Provider::Grok,
        }
    }
}

#[derive(Parser)]
#[command(name = "quizreel")]
#[command(about = "Turn a course's exam questions into a narration script and caption timeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available exams
    Exams,

    /// List the courses of an exam
    Courses {
        /// Exam id
        exam_id: String,
    },

    /// Generate the script and captions for a course
    Generate {
        /// Exam id (used for the exam name in the narration)
        #[arg(short, long)]
        exam: String,

        /// Course id whose questions are narrated
        #[arg(short, long)]
        course: String,

        /// AI provider for script generation
        #[arg(short, long, default_value = "gemini")]
        provider: CliProvider,

        /// Print the payload as JSON instead of a readable summary
        #[arg(long)]
        json: bool,

        /// Give up on the whole run after this many seconds
        #[arg(long, default_value_t = 120)]
        timeout_secs: u64,
    },
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizreel=info,quizreel_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), e);
    std::process::exit(1);
}

async fn list_exams(settings: &Settings) -> Result<()> {
    let store = PostgrestStore::from_settings(settings).unwrap_or_else(|e| fail(e));
    let exams = catalog::list_exams(&store).await?;
    tracing::info!(exams = exams.len(), "exams listed");

    if exams.is_empty() {
        println!("{}", style("No exams found").dim());
    }
    for exam in exams {
        println!("{}  {}", style(exam.id).cyan(), exam.name);
    }
    Ok(())
}

async fn list_courses(settings: &Settings, exam_id: String) -> Result<()> {
    let store = PostgrestStore::from_settings(settings).unwrap_or_else(|e| fail(e));
    let exam_id = RecordId::from(exam_id);
    let courses = catalog::list_courses(&store, &exam_id).await?;
    tracing::info!(%exam_id, courses = courses.len(), "courses listed");

    if courses.is_empty() {
        println!("{}", style("No courses found").dim());
    }
    for course in courses {
        println!("{}  {}", style(course.id).cyan(), course.name);
    }
    Ok(())
}

async fn generate(
    settings: &Settings,
    exam_id: String,
    course_id: String,
    provider: Provider,
    json: bool,
    timeout: Duration,
) -> Result<()> {
    // Validate credentials before touching the network
    let store = PostgrestStore::from_settings(settings).unwrap_or_else(|e| fail(e));
    let generator = ProviderGenerator::from_env(provider).unwrap_or_else(|e| fail(e));

    let pipeline = VideoPipeline::new(store, generator).with_tts_api_key(settings.tts_api_key.clone());
    let exam_id = RecordId::from(exam_id);
    let course_id = RecordId::from(course_id);

    let started = Instant::now();
    let spinner = create_spinner(&format!(
        "Generating script with {} and timing captions...",
        provider.name()
    ));

    let outcome = tokio::time::timeout(timeout, pipeline.run(&course_id, &exam_id)).await;
    let video = match outcome {
        Err(_) => {
            spinner.finish_and_clear();
            tracing::error!(%course_id, timeout_secs = timeout.as_secs(), "run timed out");
            fail(format!("run timed out after {}", format_duration(timeout)));
        }
        Ok(Err(e @ QuizReelError::NoQuestions { .. })) => {
            spinner.finish_and_clear();
            eprintln!("{} {}", style("No content:").yellow().bold(), e);
            std::process::exit(EXIT_NO_CONTENT);
        }
        Ok(Err(e)) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
        Ok(Ok(video)) => video,
    };

    spinner.finish_with_message(format!(
        "{} Generated {} captions, {:.1}s {}",
        style("✓").green().bold(),
        video.captions.len(),
        video.total_conceptual_duration,
        style(format!("[{}]", format_duration(started.elapsed()))).dim()
    ));

    if json {
        println!("{}", serde_json::to_string_pretty(&video)?);
    } else {
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", format_video_readable(&video));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    dotenvy::from_path("env/.env").ok();
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Command::Exams => list_exams(&settings).await,
        Command::Courses { exam_id } => list_courses(&settings, exam_id).await,
        Command::Generate {
            exam,
            course,
            provider,
            json,
            timeout_secs,
        } => {
            generate(
                &settings,
                exam,
                course,
                provider.into(),
                json,
                Duration::from_secs(timeout_secs),
            )
            .await
        }
    }
}
