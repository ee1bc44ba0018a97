//! Notes, quick links and the landing page built from them.

use crate::adapters::http::HttpFeedFetcher;
use crate::core::favicon::FaviconResolver;
use crate::core::feed_images::FeedImageResolver;
use crate::core::store::RecordStore;
use crate::domain::model::{
    DashboardView, FastLink, NewsItem, Note, QuickLink, SetupImage, User,
};
use crate::domain::ports::{FeedFetcher, Storage};
use crate::utils::error::{DashboardError, Result};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Local, NaiveDate, Utc};

pub const RECENT_NOTES_LIMIT: usize = 5;
pub const FAST_LINKS_LIMIT: usize = 8;
pub const DEFAULT_CATEGORY: &str = "general";

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123!";

#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub fast_access: bool,
}

#[derive(Debug, Clone)]
pub struct NoteUpdate {
    pub title: String,
    pub content: String,
    pub completed: bool,
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "general" => "📁",
        "development" => "💻",
        "documentation" => "📚",
        "reddit" => "🤖",
        "news" => "📰",
        "tools" => "🔧",
        "inspiration" => "✨",
        _ => "🔗",
    }
}

pub fn setup_image() -> SetupImage {
    SetupImage {
        url: "/wall.jpg".to_string(),
        title: "My wallpaper".to_string(),
        link: "#".to_string(),
    }
}

pub fn static_news(today: NaiveDate) -> Vec<NewsItem> {
    let published = today.format("%Y-%m-%d").to_string();
    [
        (
            "Linux Rice Dashboard",
            "#",
            "Your personal Linux dashboard is ready!",
            "System",
        ),
        (
            "Customize Your Linux Experience",
            "https://reddit.com/r/unixporn",
            "Join the community for sharing Linux desktop setups.",
            "r/unixporn",
        ),
        (
            "Linux News",
            "https://linuxtoday.com",
            "Stay updated with the latest Linux news.",
            "LinuxToday",
        ),
    ]
    .into_iter()
    .map(|(title, link, summary, source)| NewsItem {
        title: title.to_string(),
        link: link.to_string(),
        summary: summary.to_string(),
        published: published.clone(),
        source: source.to_string(),
    })
    .collect()
}

fn require(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DashboardError::ValidationError {
            message: format!("{} is required", field),
        });
    }
    Ok(value.to_string())
}

pub struct DashboardService<S: Storage, F: FeedFetcher = HttpFeedFetcher> {
    store: RecordStore<S>,
    resolver: FeedImageResolver<F>,
    favicons: FaviconResolver,
    argon2: Argon2<'static>,
}

impl<S: Storage, F: FeedFetcher> DashboardService<S, F> {
    pub fn new(store: RecordStore<S>, resolver: FeedImageResolver<F>, favicons: FaviconResolver) -> Self {
        Self {
            store,
            resolver,
            favicons,
            argon2: Argon2::default(),
        }
    }

    pub async fn dashboard(&self) -> Result<DashboardView> {
        let snapshot = self.store.load().await?;

        let mut notes = snapshot.notes;
        notes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        notes.truncate(RECENT_NOTES_LIMIT);

        let mut fast_links: Vec<QuickLink> =
            snapshot.links.into_iter().filter(|l| l.fast_access).collect();
        fast_links.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        let links = fast_links
            .into_iter()
            .take(FAST_LINKS_LIMIT)
            .map(|link| FastLink {
                favicon: self.favicons.resolve(&link.url),
                link,
            })
            .collect();

        let gallery = self.resolver.resolve_images().await;

        Ok(DashboardView {
            notes,
            links,
            news: static_news(Local::now().date_naive()),
            setup_image: setup_image(),
            gallery,
        })
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let mut notes = self.store.load().await?.notes;
        notes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(notes)
    }

    pub async fn add_note(&self, title: &str, content: &str) -> Result<Note> {
        let title = require("title", title)?;
        let content = require("content", content)?;

        let note = self
            .store
            .update(|snapshot| {
                let now = Utc::now();
                let note = Note {
                    id: snapshot.next_note_id(),
                    title,
                    content,
                    completed: false,
                    created_at: now,
                    updated_at: now,
                };
                snapshot.notes.push(note.clone());
                Ok(note)
            })
            .await?;

        tracing::info!("Note {} added", note.id);
        Ok(note)
    }

    pub async fn edit_note(&self, id: u64, update: NoteUpdate) -> Result<Note> {
        let title = require("title", &update.title)?;
        let content = require("content", &update.content)?;

        self.store
            .update(|snapshot| {
                let note = snapshot
                    .notes
                    .iter_mut()
                    .find(|n| n.id == id)
                    .ok_or(DashboardError::NotFound { kind: "note", id })?;
                note.title = title;
                note.content = content;
                note.completed = update.completed;
                note.updated_at = Utc::now();
                Ok(note.clone())
            })
            .await
    }

    pub async fn delete_note(&self, id: u64) -> Result<()> {
        self.store
            .update(|snapshot| {
                let before = snapshot.notes.len();
                snapshot.notes.retain(|n| n.id != id);
                if snapshot.notes.len() == before {
                    return Err(DashboardError::NotFound { kind: "note", id });
                }
                Ok(())
            })
            .await?;

        tracing::info!("Note {} deleted", id);
        Ok(())
    }

    /// All links grouped by category; insertion order within a category.
    pub async fn list_links(&self) -> Result<Vec<QuickLink>> {
        let mut links = self.store.load().await?.links;
        links.sort_by(|a, b| (&a.category, a.id).cmp(&(&b.category, b.id)));
        Ok(links)
    }

    pub async fn add_link(&self, new_link: NewLink) -> Result<QuickLink> {
        let title = require("title", &new_link.title)?;
        let url = require("url", &new_link.url)?;
        let category = new_link
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let description = new_link
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let link = self
            .store
            .update(|snapshot| {
                let link = QuickLink {
                    id: snapshot.next_link_id(),
                    title,
                    url,
                    category,
                    description,
                    fast_access: new_link.fast_access,
                    created_at: Utc::now(),
                };
                snapshot.links.push(link.clone());
                Ok(link)
            })
            .await?;

        tracing::info!("Link {} added to '{}'", link.id, link.category);
        Ok(link)
    }

    pub async fn delete_link(&self, id: u64) -> Result<()> {
        self.store
            .update(|snapshot| {
                let before = snapshot.links.len();
                snapshot.links.retain(|l| l.id != id);
                if snapshot.links.len() == before {
                    return Err(DashboardError::NotFound { kind: "link", id });
                }
                Ok(())
            })
            .await?;

        tracing::info!("Link {} deleted", id);
        Ok(())
    }

    /// Creates the `admin` account unless it exists. Returns whether it was created.
    pub async fn ensure_admin_user(&self) -> Result<bool> {
        let exists = self
            .store
            .load()
            .await?
            .users
            .iter()
            .any(|u| u.username == ADMIN_USERNAME);
        if exists {
            tracing::info!("Admin user already exists");
            return Ok(false);
        }

        let password_hash = self.hash_password(ADMIN_PASSWORD)?;
        let created = self
            .store
            .update(|snapshot| {
                if snapshot.users.iter().any(|u| u.username == ADMIN_USERNAME) {
                    return Ok(false);
                }
                let user = User {
                    id: snapshot.next_user_id(),
                    username: ADMIN_USERNAME.to_string(),
                    password_hash,
                    created_at: Utc::now(),
                };
                snapshot.users.push(user);
                Ok(true)
            })
            .await?;

        if created {
            tracing::info!("Admin user created: {}", ADMIN_USERNAME);
        }
        Ok(created)
    }

    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        let snapshot = self.store.load().await?;
        let Some(user) = snapshot.users.into_iter().find(|u| u.username == username) else {
            return Ok(None);
        };

        let parsed = PasswordHash::new(&user.password_hash).map_err(|e| DashboardError::AuthError {
            message: format!("stored hash for '{}' is unreadable: {}", username, e),
        })?;

        if self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    fn hash_password(&self, password: &str) -> Result<String> {
        let salt_bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| DashboardError::AuthError {
            message: e.to_string(),
        })?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DashboardError::AuthError {
                message: e.to_string(),
            })
    }
}
