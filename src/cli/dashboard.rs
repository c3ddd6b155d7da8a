//! Interactive document dashboard
//!
//! Shows the document board and loops over a menu until the user quits.
//! Failed actions are reported and the loop keeps going; only a failure to
//! read the terminal ends the session.

use std::path::{Path, PathBuf};

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use log::debug;

use crate::board::{DocumentAction, DocumentBoard};
use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::doc::{confirm, message_or, spinner};
use crate::client::{AuthApi, DocSignApi, PdfUpload};
use crate::error::{Error, Result};
use crate::models::display::pretty_line;

/// An action with everything it needs collected from the user
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedAction {
    Sign { name: Option<String> },
    Reject,
    Comment { note: String },
    Download { dir: PathBuf },
    Delete,
}

/// Result of an accepted action
#[derive(Debug)]
pub struct ActionOutcome {
    /// Server confirmation for the action itself
    pub message: String,
    /// Set when the follow-up list refetch failed; the board keeps its old list
    pub refresh_error: Option<Error>,
}

impl ActionOutcome {
    fn report(&self) {
        notify(&self.message);
        if let Some(ref e) = self.refresh_error {
            println!(
                "{} Document list not refreshed: {}\n",
                "⚠".yellow(),
                e
            );
        }
    }
}

/// Refetch after a mutation the server already accepted
async fn refetch_after<A: DocSignApi + ?Sized>(
    api: &A,
    board: &mut DocumentBoard,
    message: String,
) -> ActionOutcome {
    let refresh_error = match board.refresh(api).await {
        Ok(_) => None,
        Err(e) => {
            log::warn!("Refetch after accepted action failed: {}", e);
            Some(e)
        }
    };
    ActionOutcome {
        message,
        refresh_error,
    }
}

impl PlannedAction {
    fn kind(&self) -> DocumentAction {
        match self {
            PlannedAction::Sign { .. } => DocumentAction::Sign,
            PlannedAction::Reject => DocumentAction::Reject,
            PlannedAction::Comment { .. } => DocumentAction::Comment,
            PlannedAction::Download { .. } => DocumentAction::Download,
            PlannedAction::Delete => DocumentAction::Delete,
        }
    }
}

/// Run one action against the server and update the board.
///
/// Sign and reject refetch the list; a delete drops the row locally.
/// Only a failure of the action itself is an `Err`; a failed refetch is
/// carried in the outcome.
pub async fn perform<A: DocSignApi + ?Sized>(
    api: &A,
    board: &mut DocumentBoard,
    id: i64,
    action: PlannedAction,
) -> Result<ActionOutcome> {
    let kind = action.kind();

    let message = match action {
        PlannedAction::Sign { name } => {
            message_or(api.sign_document(id, name.as_deref()).await?, "Document signed")
        }
        PlannedAction::Reject => message_or(api.reject_document(id).await?, "Document rejected"),
        PlannedAction::Comment { note } => message_or(
            api.comment_document(id, note.trim()).await?,
            "Comment attached to document",
        ),
        PlannedAction::Download { dir } => {
            let file = api.download_document(id).await?;
            let target = dir.join(file.suggested_name(id));
            std::fs::write(&target, &file.bytes)?;
            format!("Saved {}", target.display())
        }
        PlannedAction::Delete => {
            let message = message_or(api.delete_document(id).await?, "Document removed");
            board.remove(id);
            message
        }
    };

    if kind.refetches() {
        return Ok(refetch_after(api, board, message).await);
    }
    Ok(ActionOutcome {
        message,
        refresh_error: None,
    })
}

/// Upload a file and refetch the list
pub async fn upload<A: DocSignApi + ?Sized>(
    api: &A,
    board: &mut DocumentBoard,
    path: &Path,
) -> Result<ActionOutcome> {
    let upload = PdfUpload::from_path(path)?;

    let pb = spinner(&format!("Uploading {}...", upload.file_name()));
    let result = api.upload_document(&upload).await;
    pb.finish_and_clear();

    let message = message_or(result?, "Document uploaded");
    Ok(refetch_after(api, board, message).await)
}

/// Run the dashboard command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let Some(session) = ctx.session() else {
        return Err(Error::NotLoggedIn);
    };

    let api = ctx.client.as_ref();
    let theme = ColorfulTheme::default();
    let mut board = DocumentBoard::new();

    println!(
        "{} {}\n",
        "DocSign Dashboard".bold(),
        format!("({})", session.display_name()).dimmed()
    );

    if let Err(e) = board.refresh(api).await {
        notify_error(&e);
    }

    loop {
        render(&board);

        let visible = board.visible();
        let mut items: Vec<String> = visible.iter().map(|d| pretty_line(d)).collect();
        let upload_idx = items.len();
        items.push("Upload a PDF".to_string());
        items.push("Refresh".to_string());
        items.push("Log out".to_string());
        items.push("Quit".to_string());
        let doc_ids: Vec<i64> = visible.iter().map(|d| d.id).collect();

        let Some(choice) = Select::with_theme(&theme)
            .with_prompt("Choose a document or action")
            .items(&items)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        if choice < upload_idx {
            let id = doc_ids[choice];
            match plan_action(&theme, &board, id, session.signer_name())? {
                Some(action) => match perform(api, &mut board, id, action).await {
                    Ok(outcome) => outcome.report(),
                    Err(e) => notify_error(&e),
                },
                None => println!("Cancelled.\n"),
            }
            continue;
        }

        match choice - upload_idx {
            0 => {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("Path to PDF")
                    .interact_text()?;
                match upload(api, &mut board, Path::new(path.trim())).await {
                    Ok(outcome) => outcome.report(),
                    Err(e) => notify_error(&e),
                }
            }
            1 => {
                if let Err(e) = board.refresh(api).await {
                    notify_error(&e);
                }
            }
            2 => {
                api.logout().await?;
                notify(&format!("Logged out {}", session.display_name()));
                break;
            }
            _ => break,
        }
    }

    Ok(())
}

/// Ask which action to run on `id` and collect its input
fn plan_action(
    theme: &ColorfulTheme,
    board: &DocumentBoard,
    id: i64,
    signer: Option<&str>,
) -> Result<Option<PlannedAction>> {
    let Some(doc) = board.get(id) else {
        return Ok(None);
    };

    let actions = DocumentAction::available_for(doc);
    let mut labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    labels.push("Back");

    let Some(choice) = Select::with_theme(theme)
        .with_prompt(format!("#{} {}", doc.id, doc.file_name))
        .items(&labels)
        .default(0)
        .interact_opt()?
    else {
        return Ok(None);
    };
    let Some(action) = actions.get(choice) else {
        return Ok(None);
    };

    let planned = match action {
        DocumentAction::Sign => {
            let mut input = Input::<String>::with_theme(theme).with_prompt("Sign as");
            if let Some(signer) = signer {
                input = input.default(signer.to_string());
            }
            let name = input
                .validate_with(|value: &String| {
                    if value.trim().is_empty() {
                        Err("name must not be empty")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;
            PlannedAction::Sign {
                name: Some(name.trim().to_string()),
            }
        }
        DocumentAction::Reject => {
            if !confirm(&format!("Reject document #{}?", id))? {
                return Ok(None);
            }
            PlannedAction::Reject
        }
        DocumentAction::Comment => {
            let note: String = Input::with_theme(theme)
                .with_prompt("Note")
                .validate_with(|input: &String| {
                    if input.trim().is_empty() {
                        Err("note must not be empty")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;
            PlannedAction::Comment { note }
        }
        DocumentAction::Download => {
            let dir: String = Input::with_theme(theme)
                .with_prompt("Save to directory")
                .default(".".to_string())
                .interact_text()?;
            PlannedAction::Download {
                dir: PathBuf::from(dir.trim()),
            }
        }
        DocumentAction::Delete => {
            if !confirm(&format!("Delete document #{}?", id))? {
                return Ok(None);
            }
            PlannedAction::Delete
        }
    };

    debug!("Planned {:?} on document {}", planned, id);
    Ok(Some(planned))
}

fn render(board: &DocumentBoard) {
    if !board.is_loaded() {
        println!("{}\n", "Document list not loaded yet.".dimmed());
        return;
    }
    let visible = board.visible();
    if visible.is_empty() {
        println!("{}\n", crate::output::NO_DOCUMENTS.dimmed());
    } else {
        println!("{} document(s)\n", visible.len());
    }
}

fn notify(message: &str) {
    println!("{} {}\n", "✓".green(), message);
}

fn notify_error(error: &Error) {
    println!("{} {}\n", "✗".red(), error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDocSignClient;
    use crate::client::models::{Document, DocumentStatus};
    use crate::error::{ApiError, Error};

    fn doc(id: i64, status: DocumentStatus) -> Document {
        Document {
            id,
            file_name: format!("doc-{}.pdf", id),
            status,
            file_type: None,
            created_at: None,
        }
    }

    async fn loaded(docs: Vec<Document>) -> (MockDocSignClient, DocumentBoard) {
        let api = MockDocSignClient::new().with_documents(docs).await;
        let mut board = DocumentBoard::new();
        board.refresh(&api).await.unwrap();
        (api, board)
    }

    #[tokio::test]
    async fn test_sign_refetches_list() {
        let (api, mut board) = loaded(vec![doc(1, DocumentStatus::Pending)]).await;

        let outcome = perform(
            &api,
            &mut board,
            1,
            PlannedAction::Sign {
                name: Some("Alice".to_string()),
            },
        )
        .await
        .unwrap();

        assert!(outcome.message.contains("Alice"));
        assert!(outcome.refresh_error.is_none());
        assert_eq!(board.get(1).unwrap().status, DocumentStatus::Signed);
        assert_eq!(api.call_counts().await.list_documents, 2);
    }

    #[tokio::test]
    async fn test_reject_refetches_list() {
        let (api, mut board) = loaded(vec![doc(2, DocumentStatus::Pending)]).await;

        perform(&api, &mut board, 2, PlannedAction::Reject)
            .await
            .unwrap();

        assert_eq!(board.get(2).unwrap().status, DocumentStatus::Rejected);
        assert_eq!(api.call_counts().await.list_documents, 2);
    }

    #[tokio::test]
    async fn test_delete_is_local_only() {
        let (api, mut board) = loaded(vec![
            doc(1, DocumentStatus::Pending),
            doc(2, DocumentStatus::Signed),
        ])
        .await;

        perform(&api, &mut board, 1, PlannedAction::Delete)
            .await
            .unwrap();

        assert!(board.get(1).is_none());
        assert_eq!(board.visible().len(), 1);
        let counts = api.call_counts().await;
        assert_eq!(counts.delete_document, 1);
        assert_eq!(counts.list_documents, 1);
    }

    #[tokio::test]
    async fn test_comment_does_not_refetch() {
        let (api, mut board) = loaded(vec![doc(3, DocumentStatus::Pending)]).await;

        let outcome = perform(
            &api,
            &mut board,
            3,
            PlannedAction::Comment {
                note: "  looks good ".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.message, "Comment saved");
        assert_eq!(api.call_counts().await.list_documents, 1);
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let (api, mut board) = loaded(vec![doc(4, DocumentStatus::Signed)]).await;
        let dir = tempfile::tempdir().unwrap();

        perform(
            &api,
            &mut board,
            4,
            PlannedAction::Download {
                dir: dir.path().to_path_buf(),
            },
        )
        .await
        .unwrap();

        let bytes = std::fs::read(dir.path().join("doc-4.pdf")).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_failed_action_keeps_board() {
        let (api, mut board) = loaded(vec![doc(5, DocumentStatus::Pending)]).await;
        let api = api
            .with_error(ApiError::Forbidden("not the owner".to_string()))
            .await;

        let err = perform(&api, &mut board, 5, PlannedAction::Delete)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Forbidden(_))));
        assert!(board.get(5).is_some());
    }

    #[tokio::test]
    async fn test_upload_refetches_list() {
        let (api, mut board) = loaded(vec![]).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lease.pdf");
        std::fs::write(&path, b"%PDF-1.7\n%%EOF\n").unwrap();

        upload(&api, &mut board, &path).await.unwrap();

        let visible = board.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].file_name, "lease.pdf");
    }

    #[tokio::test]
    async fn test_sign_succeeds_when_refetch_fails() {
        let (api, mut board) = loaded(vec![doc(6, DocumentStatus::Pending)]).await;
        let api = api.with_listing_down().await;

        let outcome = perform(&api, &mut board, 6, PlannedAction::Sign { name: None })
            .await
            .unwrap();

        assert!(outcome.message.contains("signed"));
        assert!(matches!(
            outcome.refresh_error,
            Some(Error::Api(ApiError::Network(_)))
        ));
        assert_eq!(
            api.server_documents().await[0].status,
            DocumentStatus::Signed
        );
        // Old list is kept until a refresh succeeds
        assert_eq!(board.get(6).unwrap().status, DocumentStatus::Pending);
    }

    #[tokio::test]
    async fn test_upload_succeeds_when_refetch_fails() {
        let (api, mut board) = loaded(vec![]).await;
        let api = api.with_listing_down().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lease.pdf");
        std::fs::write(&path, b"%PDF-1.7\n%%EOF\n").unwrap();

        let outcome = upload(&api, &mut board, &path).await.unwrap();

        assert!(outcome.message.contains("uploaded"));
        assert!(outcome.refresh_error.is_some());
        assert_eq!(api.call_counts().await.upload_document, 1);
        assert_eq!(api.server_documents().await.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_without_calling_server() {
        let (api, mut board) = loaded(vec![]).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = upload(&api, &mut board, &path).await.unwrap_err();

        assert!(matches!(err, Error::Upload(_)));
        assert_eq!(api.call_counts().await.upload_document, 0);
    }
}
