//! Terminal client for the counseling chatbot backend.
//!
//! Students get a chat REPL; teachers get the roster/documents dashboard.
//! Point it at a backend with `COUNSEL_API_URL` (default http://localhost:8000).

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use counsel_app::{
    AccessDecision, AccessGuard, AuthController, ConversationController, DashboardTab, Route,
    RosterView, SessionStore, TeacherDashboard, TokenSink, UploadNotice,
};
use counsel_client::RestClient;
use counsel_core::chat::{DeliveryStatus, Message, MessageRole};
use counsel_core::identity::Role;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .init();

    let client = Arc::new(RestClient::from_env());

    // The controller hands tokens back to the transport through this sink.
    let sink_client = Arc::clone(&client);
    let token_sink: TokenSink = Arc::new(move |token| match token {
        Some(token) => sink_client.set_token(token),
        None => sink_client.clear_token(),
    });

    let mut auth = AuthController::new(Arc::clone(&client) as Arc<dyn counsel_core::api::AuthApi>, token_sink);
    let mut rl = DefaultEditor::new()?;

    println!("{}", "=== Counsel ===".bright_magenta().bold());

    loop {
        let route = match sign_in(&mut auth, &mut rl).await? {
            Some(route) => route,
            None => break,
        };

        let guard = match route {
            Route::TeacherDashboard => AccessGuard::require(Role::Teacher),
            _ => AccessGuard::any_user(),
        };
        match guard.decide(auth.identity()) {
            AccessDecision::Authorized(user) => {
                println!(
                    "{}",
                    format!("Signed in as {}", user.display_name()).bright_green()
                );
                let keep_going = match route {
                    Route::TeacherDashboard => {
                        teacher_loop(&mut rl, Arc::clone(&client)).await?
                    }
                    _ => chat_loop(&mut rl, Arc::clone(&client)).await?,
                };
                auth.logout();
                if !keep_going {
                    break;
                }
            }
            _ => break,
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

/// Prompts for credentials until login succeeds or the user quits.
async fn sign_in(auth: &mut AuthController, rl: &mut DefaultEditor) -> Result<Option<Route>> {
    loop {
        let username = match rl.readline("username (or 'quit'): ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if username == "quit" || username == "exit" {
            return Ok(None);
        }
        let password = match rl.readline("password: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if let Some(route) = auth.login(&username, &password).await {
            return Ok(Some(route));
        }
        if let Some(error) = auth.error() {
            println!("{}", error.red());
        }
    }
}

fn print_message(message: &Message) {
    let line = match message.role {
        MessageRole::User => format!("you: {}", message.content).green(),
        MessageRole::Assistant => format!("assistant: {}", message.content).bright_blue(),
    };
    match message.status {
        DeliveryStatus::Failed => println!("{} {}", line, "(not delivered)".red()),
        _ => println!("{}", line),
    }
}

/// The student view: session sidebar commands plus free-text sends.
async fn chat_loop(rl: &mut DefaultEditor, client: Arc<RestClient>) -> Result<bool> {
    let confirm: counsel_app::ConfirmPrompt = Arc::new(|summary| {
        print!("Delete '{}'? [y/N] ", summary.title);
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer).unwrap_or(0);
        answer.trim().eq_ignore_ascii_case("y")
    });

    let store = SessionStore::new(Arc::clone(&client) as Arc<dyn counsel_core::api::ChatApi>, confirm);
    let mut conversation = ConversationController::new(store);
    conversation.store_mut().refresh().await;

    println!(
        "{}",
        "Commands: /sessions /new /open <id> /delete <id> /logout quit".bright_black()
    );

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        match trimmed {
            "quit" | "exit" => return Ok(false),
            "/logout" => return Ok(true),
            "/sessions" => {
                conversation.store_mut().refresh().await;
                for summary in conversation.store().sessions() {
                    println!(
                        "  [{}] {} ({} messages)",
                        summary.id, summary.title, summary.message_count
                    );
                }
            }
            "/new" => {
                if let Err(e) = conversation
                    .store_mut()
                    .create_session(counsel_app::conversation::DEFAULT_SESSION_TITLE)
                    .await
                {
                    println!("{}", format!("could not create session: {}", e).red());
                }
            }
            _ if trimmed.starts_with("/open ") => {
                if let Some(id) = parse_id(trimmed, "/open ") {
                    conversation.store_mut().select_session(id).await;
                    for message in conversation.store().messages() {
                        print_message(message);
                    }
                }
            }
            _ if trimmed.starts_with("/delete ") => {
                if let Some(id) = parse_id(trimmed, "/delete ") {
                    conversation.store_mut().delete_session(id).await;
                }
            }
            _ => {
                conversation.set_input(trimmed);
                let before = conversation.store().messages().len();
                conversation.send().await;
                for message in &conversation.store().messages()[before..] {
                    print_message(message);
                }
            }
        }
    }
}

/// The teacher view: roster drill-down and document management.
async fn teacher_loop(rl: &mut DefaultEditor, client: Arc<RestClient>) -> Result<bool> {
    let mut dashboard = TeacherDashboard::new(
        Arc::clone(&client) as Arc<dyn counsel_core::api::TeacherApi>,
        Arc::clone(&client) as Arc<dyn counsel_core::api::DocumentApi>,
    );
    dashboard.load().await;

    println!(
        "{}",
        "Commands: /students /select <n> /session <id> /back /docs /upload <path> /logout quit"
            .bright_black()
    );

    loop {
        let line = match rl.readline("teacher>> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        match trimmed {
            "quit" | "exit" => return Ok(false),
            "/logout" => return Ok(true),
            "/students" => {
                dashboard.select_tab(DashboardTab::Students);
                dashboard.roster_mut().load_roster().await;
                for (index, student) in dashboard.roster().students().iter().enumerate() {
                    println!(
                        "  [{}] {} <{}> - {} sessions",
                        index,
                        student.display_name(),
                        student.email,
                        student.sessions.len()
                    );
                }
            }
            "/back" => {
                dashboard.roster_mut().back();
                print_roster_position(dashboard.roster().view());
            }
            "/docs" => {
                dashboard.select_tab(DashboardTab::Documents);
                dashboard.documents_mut().load_documents().await;
                for document in dashboard.documents().documents() {
                    println!("  [{}] {}", document.id, document.filename);
                }
            }
            _ if trimmed.starts_with("/select ") => {
                let student = parse_id(trimmed, "/select ")
                    .and_then(|n| dashboard.roster().students().get(n as usize).cloned());
                match student {
                    Some(student) => {
                        dashboard.roster_mut().select_student(student);
                        print_roster_position(dashboard.roster().view());
                    }
                    None => println!("{}", "no such student".red()),
                }
            }
            _ if trimmed.starts_with("/session ") => {
                if let Some(id) = parse_id(trimmed, "/session ") {
                    dashboard.roster_mut().view_session_detail(id).await;
                    if let Some(session) = dashboard.roster().view().session() {
                        println!("{}", session.title.bold());
                        for message in &session.messages {
                            print_message(message);
                        }
                    }
                }
            }
            _ if trimmed.starts_with("/upload ") => {
                let path = trimmed.trim_start_matches("/upload ").trim();
                let filename = std::path::Path::new(path)
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default();
                match std::fs::read(path) {
                    Ok(bytes) => {
                        dashboard.documents_mut().upload(&filename, bytes).await;
                        match dashboard.documents().notice() {
                            Some(UploadNotice::Uploaded) => {
                                println!("{}", "uploaded".bright_green())
                            }
                            Some(UploadNotice::Rejected(reason))
                            | Some(UploadNotice::Failed(reason)) => {
                                println!("{}", reason.red())
                            }
                            None => {}
                        }
                    }
                    Err(e) => println!("{}", format!("cannot read {}: {}", path, e).red()),
                }
            }
            _ => println!("{}", "Unknown command".bright_black()),
        }
    }
}

fn print_roster_position(view: &RosterView) {
    match view {
        RosterView::Roster => println!("{}", "at roster".bright_black()),
        RosterView::StudentSelected(student) => {
            println!("{}", format!("viewing {}", student.display_name()).bold());
            for session in &student.sessions {
                println!(
                    "  [{}] {} ({} messages)",
                    session.id,
                    session.title,
                    session.messages.len()
                );
            }
            if student.sessions.is_empty() {
                println!("{}", "  no conversations yet".bright_black());
            }
        }
        RosterView::SessionDetail(_, session) => {
            println!("{}", format!("viewing transcript '{}'", session.title).bold());
        }
    }
}

fn parse_id(input: &str, prefix: &str) -> Option<i64> {
    match input.trim_start_matches(prefix).trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("{}", "expected a numeric id".red());
            None
        }
    }
}
