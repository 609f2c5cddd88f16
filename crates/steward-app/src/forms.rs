// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{ChapterId, MutationOutcome, PageId, UploadKind};

pub const DEVOTION_CATEGORIES: [&str; 8] = [
    "Daily Devotion",
    "Prayer",
    "Faith",
    "Hope",
    "Love",
    "Worship",
    "Scripture Study",
    "Reflection",
];

const STUDY_PAGE_EXTENSIONS: [&str; 4] = ["pdf", "mp3", "wav", "ogg"];
const DEVOTION_FILE_EXTENSIONS: [&str; 4] = ["pdf", "mp3", "wav", "m4a"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageFileType {
    #[default]
    Text,
    Pdf,
    Audio,
}

impl PageFileType {
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.contains("pdf") {
            Self::Pdf
        } else if mime_type.contains("audio") {
            Self::Audio
        } else {
            Self::Text
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Audio => "audio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub name: String,
    pub mime_type: String,
}

impl AttachedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    fn has_extension(&self, allowed: &[&str]) -> bool {
        file_has_extension(&self.name, allowed)
    }
}

fn file_has_extension(name: &str, allowed: &[&str]) -> bool {
    name.rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .is_some_and(|extension| allowed.contains(&extension.as_str()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDraft {
    pub id: PageId,
    pub title: String,
    pub content: String,
    pub file_type: PageFileType,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDraft {
    pub id: ChapterId,
    pub number: u32,
    pub title: String,
    pub pages: Vec<PageDraft>,
}

/// A study being assembled chapter by chapter before upload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudyDraft {
    pub title: String,
    pub description: String,
    chapters: Vec<ChapterDraft>,
    next_id: i64,
}

impl StudyDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn chapters(&self) -> &[ChapterDraft] {
        &self.chapters
    }

    pub fn page_count(&self) -> usize {
        self.chapters.iter().map(|chapter| chapter.pages.len()).sum()
    }

    pub fn add_chapter(&mut self) -> ChapterId {
        let id = ChapterId::new(self.allocate_id());
        self.chapters.push(ChapterDraft {
            id,
            number: self.chapters.len() as u32 + 1,
            title: String::new(),
            pages: Vec::new(),
        });
        id
    }

    pub fn rename_chapter(&mut self, id: ChapterId, title: &str) -> MutationOutcome {
        match self.chapter_mut(id) {
            Some(chapter) => {
                chapter.title = title.to_owned();
                MutationOutcome::Applied
            }
            None => MutationOutcome::NotFound,
        }
    }

    /// Removes a chapter and renumbers the remaining ones from 1.
    pub fn remove_chapter(&mut self, id: ChapterId) -> MutationOutcome {
        let before = self.chapters.len();
        self.chapters.retain(|chapter| chapter.id != id);
        if self.chapters.len() == before {
            return MutationOutcome::NotFound;
        }
        for (index, chapter) in self.chapters.iter_mut().enumerate() {
            chapter.number = index as u32 + 1;
        }
        MutationOutcome::Applied
    }

    pub fn add_page(&mut self, chapter_id: ChapterId) -> Option<PageId> {
        let id = PageId::new(self.next_id + 1);
        let chapter = self.chapter_mut(chapter_id)?;
        chapter.pages.push(PageDraft {
            id,
            title: String::new(),
            content: String::new(),
            file_type: PageFileType::Text,
            file_name: None,
        });
        self.next_id += 1;
        Some(id)
    }

    pub fn update_page(
        &mut self,
        chapter_id: ChapterId,
        page_id: PageId,
        update: PageUpdate,
    ) -> MutationOutcome {
        let Some(page) = self.page_mut(chapter_id, page_id) else {
            return MutationOutcome::NotFound;
        };
        if let Some(title) = update.title {
            page.title = title;
        }
        if let Some(content) = update.content {
            page.content = content;
        }
        MutationOutcome::Applied
    }

    pub fn remove_page(&mut self, chapter_id: ChapterId, page_id: PageId) -> MutationOutcome {
        let Some(chapter) = self.chapter_mut(chapter_id) else {
            return MutationOutcome::NotFound;
        };
        let before = chapter.pages.len();
        chapter.pages.retain(|page| page.id != page_id);
        if chapter.pages.len() == before {
            MutationOutcome::NotFound
        } else {
            MutationOutcome::Applied
        }
    }

    /// Attaches a file to a page. PDF and audio files replace the page body
    /// with a file reference; anything else clears it for typed content.
    pub fn attach_file(
        &mut self,
        chapter_id: ChapterId,
        page_id: PageId,
        file: &AttachedFile,
    ) -> MutationOutcome {
        let Some(page) = self.page_mut(chapter_id, page_id) else {
            return MutationOutcome::NotFound;
        };
        let file_type = PageFileType::from_mime(&file.mime_type);
        page.file_type = file_type;
        page.file_name = Some(file.name.clone());
        page.content = match file_type {
            PageFileType::Pdf | PageFileType::Audio => format!("File: {}", file.name),
            PageFileType::Text => String::new(),
        };
        MutationOutcome::Applied
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("study title is required -- enter a title and retry");
        }
        for chapter in &self.chapters {
            for page in &chapter.pages {
                if let Some(file_name) = &page.file_name
                    && page.file_type != PageFileType::Text
                    && !file_has_extension(file_name, &STUDY_PAGE_EXTENSIONS)
                {
                    bail!(
                        "chapter {} page file {file_name:?} must be one of .pdf, .mp3, .wav, .ogg",
                        chapter.number
                    );
                }
            }
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn chapter_mut(&mut self, id: ChapterId) -> Option<&mut ChapterDraft> {
        self.chapters.iter_mut().find(|chapter| chapter.id == id)
    }

    fn page_mut(&mut self, chapter_id: ChapterId, page_id: PageId) -> Option<&mut PageDraft> {
        self.chapter_mut(chapter_id)?
            .pages
            .iter_mut()
            .find(|page| page.id == page_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DevotionForm {
    pub title: String,
    pub description: String,
    pub date: Option<Date>,
    pub category: String,
    pub file: Option<AttachedFile>,
}

impl DevotionForm {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("devotion title is required -- enter a title and retry");
        }
        if self.description.trim().is_empty() {
            bail!("devotion description is required -- describe the devotion and retry");
        }
        if self.date.is_none() {
            bail!("devotion date is required -- pick a date and retry");
        }
        if self.category.trim().is_empty() {
            bail!("devotion category is required -- choose a category and retry");
        }
        if !DEVOTION_CATEGORIES.contains(&self.category.as_str()) {
            bail!(
                "unknown devotion category {:?}; choose one of: {}",
                self.category,
                DEVOTION_CATEGORIES.join(", ")
            );
        }
        if let Some(file) = &self.file
            && !file.has_extension(&DEVOTION_FILE_EXTENSIONS)
        {
            bail!(
                "devotion file {:?} must be a PDF or audio file (.pdf, .mp3, .wav, .m4a)",
                file.name
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SermonMedia {
    Url(String),
    File(Option<AttachedFile>),
}

impl Default for SermonMedia {
    fn default() -> Self {
        Self::Url(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SermonForm {
    pub title: String,
    pub speaker: String,
    pub date: Option<Date>,
    pub media: SermonMedia,
    pub summary: String,
}

impl SermonForm {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("sermon title is required -- enter a title and retry");
        }
        if self.speaker.trim().is_empty() {
            bail!("sermon speaker is required -- enter the speaker name and retry");
        }
        if self.date.is_none() {
            bail!("sermon date is required -- pick a date and retry");
        }
        if self.summary.trim().is_empty() {
            bail!("sermon summary is required -- add a brief summary and retry");
        }
        match &self.media {
            SermonMedia::Url(raw) if !raw.trim().is_empty() => {
                let parsed = url::Url::parse(raw.trim()).map_err(|error| {
                    anyhow::anyhow!("sermon media URL {raw:?} is invalid: {error}")
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    bail!("sermon media URL must use http or https, got {:?}", parsed.scheme());
                }
            }
            SermonMedia::File(Some(file))
                if !(file.mime_type.starts_with("audio/")
                    || file.mime_type.starts_with("video/")) =>
            {
                bail!(
                    "sermon file {:?} must be audio or video, got {:?}",
                    file.name,
                    file.mime_type
                );
            }
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormPayload {
    Study(StudyDraft),
    Devotion(DevotionForm),
    Sermon(SermonForm),
}

impl FormPayload {
    pub fn kind(&self) -> UploadKind {
        match self {
            Self::Study(_) => UploadKind::Study,
            Self::Devotion(_) => UploadKind::Devotion,
            Self::Sermon(_) => UploadKind::Sermon,
        }
    }

    pub fn blank_for(kind: UploadKind) -> Self {
        match kind {
            UploadKind::Study => Self::Study(StudyDraft::default()),
            UploadKind::Devotion => Self::Devotion(DevotionForm::default()),
            UploadKind::Sermon => Self::Sermon(SermonForm::default()),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Study(draft) => &draft.title,
            Self::Devotion(form) => &form.title,
            Self::Sermon(form) => &form.title,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Study(draft) => draft.validate(),
            Self::Devotion(form) => form.validate(),
            Self::Sermon(form) => form.validate(),
        }
    }
}
