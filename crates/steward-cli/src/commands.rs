// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use steward_app::{
    AdminCommand, AttachedFile, DevotionForm, FilterField, FormPayload, PageUpdate, RequestId,
    RequestStatus, Screen, SermonForm, SermonMedia, StudyDraft, StudyId, StudyStatus, UploadKind,
};
use time::Date;
use time::macros::format_description;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Help,
    Dashboard,
    Show(Screen),
    ProgressSummary,
    RequestCounts,
    Admin(AdminCommand),
    Wait,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (head, rest) = split_word(line);
    let command = match head {
        "help" | "?" => SessionCommand::Help,
        "dashboard" => SessionCommand::Dashboard,
        "studies" => parse_studies(rest)?,
        "progress" => parse_progress(rest)?,
        "requests" => parse_requests(rest)?,
        "upload" => SessionCommand::Admin(AdminCommand::BeginUpload(parse_upload(rest)?)),
        "wait" => SessionCommand::Wait,
        "quit" | "exit" => SessionCommand::Quit,
        unknown => bail!("unknown command {unknown:?}; type `help` to list commands"),
    };
    Ok(Some(command))
}

fn parse_studies(rest: &str) -> Result<SessionCommand> {
    let (action, arg) = split_word(rest);
    let command = match action {
        "" | "list" => return Ok(SessionCommand::Show(Screen::Studies)),
        "search" => filter(Screen::Studies, FilterField::Query, arg),
        "filter" => filter(Screen::Studies, FilterField::Status, arg),
        "clear" => AdminCommand::ClearFilters(Screen::Studies),
        "toggle" => AdminCommand::ToggleStudyLock(study_id(arg)?),
        "lock" => AdminCommand::SetStudyLock {
            id: study_id(arg)?,
            locked: true,
        },
        "unlock" => AdminCommand::SetStudyLock {
            id: study_id(arg)?,
            locked: false,
        },
        "delete" => AdminCommand::DeleteStudy(study_id(arg)?),
        "publish" => AdminCommand::SetStudyStatus {
            id: study_id(arg)?,
            status: StudyStatus::Published,
        },
        "unpublish" => AdminCommand::SetStudyStatus {
            id: study_id(arg)?,
            status: StudyStatus::Draft,
        },
        unknown => bail!(
            "unknown studies action {unknown:?}; use search, filter, clear, lock, unlock, toggle, delete, publish or unpublish"
        ),
    };
    Ok(SessionCommand::Admin(command))
}

fn parse_progress(rest: &str) -> Result<SessionCommand> {
    let (action, arg) = split_word(rest);
    let command = match action {
        "" | "list" => return Ok(SessionCommand::Show(Screen::Progress)),
        "summary" => return Ok(SessionCommand::ProgressSummary),
        "search" => filter(Screen::Progress, FilterField::Query, arg),
        "study" => filter(Screen::Progress, FilterField::Status, arg),
        "clear" => AdminCommand::ClearFilters(Screen::Progress),
        unknown => {
            bail!("unknown progress action {unknown:?}; use search, study, summary or clear")
        }
    };
    Ok(SessionCommand::Admin(command))
}

fn parse_requests(rest: &str) -> Result<SessionCommand> {
    let (action, arg) = split_word(rest);
    let command = match action {
        "" | "list" => return Ok(SessionCommand::Show(Screen::Requests)),
        "counts" => return Ok(SessionCommand::RequestCounts),
        "search" => filter(Screen::Requests, FilterField::Query, arg),
        "filter" => filter(Screen::Requests, FilterField::Status, arg),
        "clear" => AdminCommand::ClearFilters(Screen::Requests),
        "read" => AdminCommand::SetRequestStatus {
            id: request_id(arg)?,
            status: RequestStatus::Read,
        },
        "respond" => AdminCommand::SetRequestStatus {
            id: request_id(arg)?,
            status: RequestStatus::Responded,
        },
        unknown => bail!(
            "unknown requests action {unknown:?}; use search, filter, clear, read, respond or counts"
        ),
    };
    Ok(SessionCommand::Admin(command))
}

fn filter(screen: Screen, field: FilterField, value: &str) -> AdminCommand {
    AdminCommand::SetFilter {
        screen,
        field,
        value: value.to_owned(),
    }
}

fn study_id(raw: &str) -> Result<StudyId> {
    StudyId::parse(raw).ok_or_else(|| anyhow!("expected a numeric study id, got {raw:?}"))
}

fn request_id(raw: &str) -> Result<RequestId> {
    RequestId::parse(raw).ok_or_else(|| anyhow!("expected a numeric request id, got {raw:?}"))
}

/// Parses `<kind> key=value; key=value; ...` into a form payload. Study
/// fields apply in order: `chapter=` opens a chapter, `page=` adds a page to
/// the latest chapter and `file=` attaches to the latest page.
pub fn parse_upload(rest: &str) -> Result<FormPayload> {
    let (kind_raw, fields_raw) = split_word(rest);
    let kind = UploadKind::parse(kind_raw).ok_or_else(|| {
        anyhow!("upload needs a kind: study, devotion or sermon (got {kind_raw:?})")
    })?;
    let mut payload = FormPayload::blank_for(kind);
    for (key, value) in parse_fields(fields_raw)? {
        apply_field(&mut payload, key, value)
            .with_context(|| format!("{kind} field {key:?}"))?;
    }
    Ok(payload)
}

fn parse_fields(raw: &str) -> Result<Vec<(&str, &str)>> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.split_once('=')
                .map(|(key, value)| (key.trim(), value.trim()))
                .ok_or_else(|| anyhow!("expected key=value, got {part:?}"))
        })
        .collect()
}

fn apply_field(payload: &mut FormPayload, key: &str, value: &str) -> Result<()> {
    match payload {
        FormPayload::Study(draft) => apply_study_field(draft, key, value),
        FormPayload::Devotion(form) => apply_devotion_field(form, key, value),
        FormPayload::Sermon(form) => apply_sermon_field(form, key, value),
    }
}

fn apply_study_field(draft: &mut StudyDraft, key: &str, value: &str) -> Result<()> {
    match key {
        "title" => draft.title = value.to_owned(),
        "description" => draft.description = value.to_owned(),
        "chapter" => {
            let id = draft.add_chapter();
            draft.rename_chapter(id, value);
        }
        "page" | "file" => {
            let chapter = draft
                .chapters()
                .last()
                .map(|chapter| chapter.id)
                .ok_or_else(|| anyhow!("add a chapter= before {key}="))?;
            let last_page = draft
                .chapters()
                .last()
                .and_then(|chapter| chapter.pages.last())
                .map(|page| page.id);
            let page = match (key, last_page) {
                ("file", Some(page)) => page,
                _ => draft
                    .add_page(chapter)
                    .ok_or_else(|| anyhow!("chapter disappeared while adding a page"))?,
            };
            if key == "page" {
                draft.update_page(
                    chapter,
                    page,
                    PageUpdate {
                        title: Some(value.to_owned()),
                        content: None,
                    },
                );
            } else {
                draft.attach_file(chapter, page, &attached(value));
            }
        }
        unknown => bail!(
            "unknown study field; expected title, description, chapter, page or file, got {unknown:?}"
        ),
    }
    Ok(())
}

fn apply_devotion_field(form: &mut DevotionForm, key: &str, value: &str) -> Result<()> {
    match key {
        "title" => form.title = value.to_owned(),
        "description" => form.description = value.to_owned(),
        "date" => form.date = Some(parse_date(value)?),
        "category" => form.category = value.to_owned(),
        "file" => form.file = Some(attached(value)),
        unknown => bail!(
            "unknown devotion field; expected title, description, date, category or file, got {unknown:?}"
        ),
    }
    Ok(())
}

fn apply_sermon_field(form: &mut SermonForm, key: &str, value: &str) -> Result<()> {
    match key {
        "title" => form.title = value.to_owned(),
        "speaker" => form.speaker = value.to_owned(),
        "date" => form.date = Some(parse_date(value)?),
        "summary" => form.summary = value.to_owned(),
        "url" => form.media = SermonMedia::Url(value.to_owned()),
        "file" => form.media = SermonMedia::File(Some(attached(value))),
        unknown => bail!(
            "unknown sermon field; expected title, speaker, date, summary, url or file, got {unknown:?}"
        ),
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("invalid date {raw:?}; use YYYY-MM-DD"))
}

fn attached(name: &str) -> AttachedFile {
    AttachedFile::new(name, mime_for(name))
}

fn mime_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "txt" | "md" => "text/plain",
        _ => "application/octet-stream",
    }
}

fn split_word(raw: &str) -> (&str, &str) {
    let raw = raw.trim();
    match raw.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (raw, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionCommand, parse_command, parse_upload};
    use anyhow::Result;
    use steward_app::{
        AdminCommand, FilterField, FormPayload, PageFileType, RequestId, RequestStatus, Screen,
        SermonMedia, StudyId, StudyStatus,
    };
    use time::macros::date;

    fn admin(line: &str) -> Result<AdminCommand> {
        match parse_command(line)? {
            Some(SessionCommand::Admin(command)) => Ok(command),
            other => anyhow::bail!("expected admin command, got {other:?}"),
        }
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() -> Result<()> {
        assert_eq!(parse_command("   ")?, None);
        assert_eq!(parse_command("# note")?, None);
        Ok(())
    }

    #[test]
    fn study_actions_parse() -> Result<()> {
        assert_eq!(
            parse_command("studies")?,
            Some(SessionCommand::Show(Screen::Studies))
        );
        assert_eq!(
            admin("studies filter locked")?,
            AdminCommand::SetFilter {
                screen: Screen::Studies,
                field: FilterField::Status,
                value: "locked".to_owned(),
            }
        );
        assert_eq!(
            admin("studies search  React Patterns ")?,
            AdminCommand::SetFilter {
                screen: Screen::Studies,
                field: FilterField::Query,
                value: "React Patterns".to_owned(),
            }
        );
        assert_eq!(admin("studies delete 999")?, AdminCommand::DeleteStudy(StudyId::new(999)));
        assert_eq!(
            admin("studies unlock 1")?,
            AdminCommand::SetStudyLock {
                id: StudyId::new(1),
                locked: false,
            }
        );
        assert_eq!(admin("studies toggle 2")?, AdminCommand::ToggleStudyLock(StudyId::new(2)));
        assert_eq!(
            admin("studies unpublish 1")?,
            AdminCommand::SetStudyStatus {
                id: StudyId::new(1),
                status: StudyStatus::Draft,
            }
        );
        Ok(())
    }

    #[test]
    fn progress_study_keeps_spaces_in_name() -> Result<()> {
        assert_eq!(
            admin("progress study TypeScript Fundamentals")?,
            AdminCommand::SetFilter {
                screen: Screen::Progress,
                field: FilterField::Status,
                value: "TypeScript Fundamentals".to_owned(),
            }
        );
        assert_eq!(parse_command("progress summary")?, Some(SessionCommand::ProgressSummary));
        Ok(())
    }

    #[test]
    fn request_actions_parse() -> Result<()> {
        assert_eq!(
            admin("requests respond 4")?,
            AdminCommand::SetRequestStatus {
                id: RequestId::new(4),
                status: RequestStatus::Responded,
            }
        );
        assert_eq!(parse_command("requests counts")?, Some(SessionCommand::RequestCounts));
        Ok(())
    }

    #[test]
    fn bad_ids_and_unknown_commands_fail() {
        let error = parse_command("studies lock abc").expect_err("non-numeric id");
        assert!(error.to_string().contains("numeric study id"));

        let error = parse_command("frobnicate").expect_err("unknown command");
        assert!(error.to_string().contains("help"));
    }

    #[test]
    fn study_upload_builds_chapters_and_pages() -> Result<()> {
        let payload = parse_upload(
            "study title=Romans; chapter=Grace; page=Intro; file=intro.pdf; chapter=Faith; page=Audio; file=talk.mp3",
        )?;
        let FormPayload::Study(draft) = payload else {
            anyhow::bail!("expected study payload");
        };
        assert_eq!(draft.title, "Romans");
        assert_eq!(draft.chapters().len(), 2);
        assert_eq!(draft.chapters()[1].number, 2);
        let page = &draft.chapters()[0].pages[0];
        assert_eq!(page.title, "Intro");
        assert_eq!(page.file_type, PageFileType::Pdf);
        assert_eq!(page.content, "File: intro.pdf");
        assert_eq!(draft.chapters()[1].pages[0].file_type, PageFileType::Audio);
        Ok(())
    }

    #[test]
    fn page_without_chapter_is_rejected() {
        let error = parse_upload("study title=Romans; page=Intro").expect_err("no chapter");
        assert!(format!("{error:#}").contains("chapter="));
    }

    #[test]
    fn sermon_upload_parses_date_and_url() -> Result<()> {
        let payload = parse_upload(
            "sermon title=Hope; speaker=Pastor Lee; date=2024-02-04; url=https://example.com/hope; summary=On waiting",
        )?;
        let FormPayload::Sermon(form) = payload else {
            anyhow::bail!("expected sermon payload");
        };
        assert_eq!(form.date, Some(date!(2024 - 02 - 04)));
        assert_eq!(form.media, SermonMedia::Url("https://example.com/hope".to_owned()));
        Ok(())
    }

    #[test]
    fn upload_rejects_bad_dates_and_kinds() {
        let error = parse_upload("devotion date=02/04/2024").expect_err("bad date");
        assert!(format!("{error:#}").contains("YYYY-MM-DD"));

        let error = parse_upload("podcast title=x").expect_err("bad kind");
        assert!(error.to_string().contains("study, devotion or sermon"));
    }
}
