//! View model and its text rendering
//!
//! Logged out, the view is only the login control. Logged in, it shows the
//! user badge, the error banner, the search term and the sound grid.

use crate::preferences::Theme;
use crate::session::SessionContext;
use soundboard_core::message_link;
use soundboard_playback::PlaybackState;
use std::fmt;

const PROGRESS_BAR_WIDTH: usize = 20;

/// Where links and avatars point
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings<'a> {
    pub link_host: &'a str,
    pub guild_id: &'a str,
    pub cdn_base: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserBadge {
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundCard {
    /// 1-based grid position, as used by `play #n`
    pub position: usize,
    pub key: String,
    pub volume_label: String,
    pub link: String,
    pub playing: bool,
    /// Percent, only meaningful while `playing`
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    LoggedOut {
        theme: Theme,
        login_url: String,
    },
    LoggedIn {
        theme: Theme,
        user: Option<UserBadge>,
        error: Option<String>,
        search: String,
        cards: Vec<SoundCard>,
        /// Catalog size before filtering
        total: usize,
    },
}

impl View {
    pub fn build(
        ctx: &SessionContext,
        playback: &PlaybackState,
        progress: f64,
        theme: Theme,
        login_url: &str,
        settings: ViewSettings<'_>,
    ) -> Self {
        if !ctx.is_logged_in() {
            return View::LoggedOut {
                theme,
                login_url: login_url.to_string(),
            };
        }

        let cards = ctx
            .visible()
            .into_iter()
            .enumerate()
            .map(|(i, (key, sound))| {
                let playing = playback.is_playing_key(key);
                SoundCard {
                    position: i + 1,
                    key: key.to_string(),
                    volume_label: sound.volume_label(),
                    link: message_link(settings.link_host, settings.guild_id, sound),
                    playing,
                    progress: if playing { progress } else { 0.0 },
                }
            })
            .collect();

        View::LoggedIn {
            theme,
            user: ctx.user().map(|user| UserBadge {
                username: user.username.clone(),
                avatar_url: user.avatar_url(settings.cdn_base),
            }),
            error: ctx.error().map(str::to_string),
            search: ctx.search().to_string(),
            cards,
            total: ctx.catalog().len(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, View::LoggedIn { .. })
    }

    /// Sound cards in grid order (empty when logged out)
    pub fn cards(&self) -> &[SoundCard] {
        match self {
            View::LoggedIn { cards, .. } => cards,
            View::LoggedOut { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            View::LoggedIn { error, .. } => error.as_deref(),
            View::LoggedOut { .. } => None,
        }
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        percent
    )
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::LoggedOut { theme, login_url } => {
                writeln!(f, "== Soundboard ({} theme) ==", theme)?;
                writeln!(f, "Log in with Discord:")?;
                writeln!(f, "  {}", login_url)?;
                write!(f, "Then paste the address you were sent back to: login <url>")
            }
            View::LoggedIn {
                theme,
                user,
                error,
                search,
                cards,
                total,
            } => {
                writeln!(f, "== Soundboard ({} theme) ==", theme)?;
                if let Some(user) = user {
                    match &user.avatar_url {
                        Some(avatar) => writeln!(f, "Logged in as {} ({})", user.username, avatar)?,
                        None => writeln!(f, "Logged in as {}", user.username)?,
                    }
                }
                if let Some(error) = error {
                    writeln!(f, "!! {}", error)?;
                }
                writeln!(f, "Search: {}", if search.is_empty() { "(none)" } else { search })?;

                if cards.is_empty() {
                    return write!(f, "No sounds ({} in catalog)", total);
                }

                let marker = match theme {
                    Theme::Light => ">",
                    Theme::Dark => "*",
                };
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "{} #{:<3} {}  [volume: {}]  {}",
                        if card.playing { marker } else { " " },
                        card.position,
                        card.key,
                        card.volume_label,
                        card.link
                    )?;
                    if card.playing {
                        write!(f, "  {}", progress_bar(card.progress))?;
                    }
                }
                Ok(())
            }
        }
    }
}
