// App state and main event loop.
// Runs fetch sessions in the background and applies their results to the view.

use std::io;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::github::GitHubClient;
use crate::identity::Identity;
use crate::state::{LanguageFilter, Progress, SessionOutcome, StarredLoader, StarredState};
use crate::ui;

/// Message from a background session to the event loop.
#[derive(Debug)]
pub enum SessionEvent {
    Progress { session: u64, progress: Progress },
    Finished { session: u64, outcome: SessionOutcome },
}

/// Main application state.
pub struct App {
    pub identity: Identity,
    pub starred: StarredState,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    loader: Arc<StarredLoader>,
    client: GitHubClient,
    events_tx: UnboundedSender<SessionEvent>,
    events_rx: UnboundedReceiver<SessionEvent>,
    task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        identity: Identity,
        loader: Arc<StarredLoader>,
        client: GitHubClient,
        filter: LanguageFilter,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            identity,
            starred: StarredState::new(filter),
            show_help: false,
            should_quit: false,
            loader,
            client,
            events_tx,
            events_rx,
            task: None,
        }
    }

    /// Start a session in the background. With `reload`, the cached snapshot
    /// is dropped first. Any running session is abandoned.
    pub fn start_session(&mut self, reload: bool) {
        let ticket = self.loader.begin(&self.identity);
        let session = ticket.id();
        self.starred.set_loading(session);

        if let Some(task) = self.task.take() {
            task.abort();
        }

        let loader = Arc::clone(&self.loader);
        let mut client = self.client.clone();
        let identity = self.identity.clone();
        let tx = self.events_tx.clone();

        self.task = Some(tokio::spawn(async move {
            let progress_tx = tx.clone();
            let on_progress = move |progress: Progress| {
                let _ = progress_tx.send(SessionEvent::Progress { session, progress });
            };

            let outcome = if reload {
                loader
                    .reload(&ticket, &mut client, identity, on_progress)
                    .await
            } else {
                loader.load(&ticket, &mut client, identity, on_progress).await
            };

            let _ = tx.send(SessionEvent::Finished { session, outcome });
        }));
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.drain_session_events();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
        Ok(())
    }

    /// Apply every pending message from background sessions.
    fn drain_session_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            let applied = match event {
                SessionEvent::Progress { session, progress } => {
                    self.starred.apply_progress(session, progress)
                }
                SessionEvent::Finished { session, outcome } => {
                    self.starred.apply_outcome(session, outcome)
                }
            };
            if !applied {
                debug!("dropped message from abandoned session");
            }
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('?') if self.show_help => self.show_help = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.starred.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.starred.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.starred.cycle_filter(true),
            KeyCode::Char('h') | KeyCode::Left => self.starred.cycle_filter(false),
            KeyCode::Char('a') => self.starred.set_filter(LanguageFilter::All),
            KeyCode::Char('r') => self.start_session(true),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryStore, Snapshot, SnapshotStore};
    use crate::state::Row;
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn rows(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| Row {
                owner: "o".to_string(),
                repo: format!("r{}", i),
                description: None,
                language: Some(if i % 2 == 0 { "Rust" } else { "Go" }.to_string()),
                stars: 0,
            })
            .collect()
    }

    async fn settle(app: &mut App) {
        for _ in 0..500 {
            app.drain_session_events();
            if !app.starred.data.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("session did not finish");
    }

    #[tokio::test]
    async fn test_cached_session_and_keys() {
        let identity = Identity::resolve("octocat").unwrap();
        let store = Arc::new(MemoryStore::new());
        store
            .write(&identity.cache_key(), &Snapshot::new(rows(5)))
            .unwrap();
        let loader = Arc::new(StarredLoader::new(store));
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&mock_server)
            .await;
        let client = GitHubClient::new(&mock_server.uri(), None).unwrap();

        let mut app = App::new(identity, loader, client, LanguageFilter::All);
        app.start_session(false);
        settle(&mut app).await;

        assert!(app.starred.data.data().unwrap().cached);
        assert_eq!(app.starred.visible_rows().len(), 5);

        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.starred.filter.to_string(), "Go");
        assert_eq!(app.starred.visible_rows().len(), 2);

        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.starred.filter, LanguageFilter::All);

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_reload_failure_surfaces_error() {
        let identity = Identity::resolve("octocat").unwrap();
        let store = Arc::new(MemoryStore::new());
        store
            .write(&identity.cache_key(), &Snapshot::new(rows(5)))
            .unwrap();
        let loader = Arc::new(StarredLoader::new(store.clone()));
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/starred"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = GitHubClient::new(&mock_server.uri(), None).unwrap();

        let mut app = App::new(identity.clone(), loader, client, LanguageFilter::All);
        app.handle_key(KeyCode::Char('r'));
        settle(&mut app).await;

        assert!(app.starred.data.is_error());
        assert!(store.read(&identity.cache_key()).is_none());
    }
}
