//! Portal runtime
//!
//! Owns the mounted screen, the event queue and navigation. Screens hand
//! back effects; the runtime performs them, running auth calls to
//! completion and feeding the result back in as a new event.
//!
//! ```text
//! dispatch(event) → queue → Screen::handle → effects
//!                     ▲                        │
//!                     └── Completed(result) ◄──┘ Request → AuthApi
//! ```
//!
//! Requests run without timeout or retry. A request that never completes
//! keeps the dispatch future pending and the screen in its submitting
//! state.

use crate::auth::AuthApi;
use crate::navigation::{admit, Admission, Route};
use crate::screens::{
    AuthCall, Effect, Event, LoginEvent, RegisterEvent, Screen,
};
use crate::session::AuthSession;
use crate::settings::{SettingsRecord, Theme};
use crate::store::Preferences;
use std::collections::VecDeque;
use std::sync::Arc;

/// A running portal instance
pub struct Portal {
    prefs: Preferences,
    auth: Arc<dyn AuthApi>,
    route: Route,
    screen: Screen,
    history: Vec<Route>,
    theme: Theme,
    opened: Vec<String>,
    queue: VecDeque<Event>,
}

impl Portal {
    /// Start at `/` with the stored theme applied
    pub fn new(prefs: Preferences, auth: Arc<dyn AuthApi>) -> Self {
        let theme = SettingsRecord::load(&prefs).theme();
        let (screen, _) = Screen::mount(Route::Root, &prefs);
        Self {
            prefs,
            auth,
            route: Route::Root,
            screen,
            history: Vec::new(),
            theme,
            opened: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// External URLs opened so far, oldest first
    pub fn opened_links(&self) -> &[String] {
        &self.opened
    }

    pub fn session(&self) -> AuthSession {
        AuthSession::load(&self.prefs)
    }

    /// Navigate through the gate, mounting the admitted screen
    pub fn open(&mut self, route: Route) -> Admission {
        let admission = admit(route, &self.session());
        let target = admission.route();

        if target != self.route {
            self.history.push(self.route);
        }
        self.mount(target);
        tracing::debug!(requested = %route, rendered = %target, "Navigated");
        admission
    }

    /// Handle an event and everything it triggers
    pub async fn dispatch(&mut self, event: impl Into<Event>) {
        self.queue.push_back(event.into());

        while let Some(event) = self.queue.pop_front() {
            let effects = self.screen.handle(event);
            for effect in effects {
                self.apply(effect).await;
            }
        }
    }

    async fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Navigate(route) => {
                self.open(route);
            }
            Effect::Reload(route) => {
                tracing::debug!(route = %route, "Full reload");
                self.theme = SettingsRecord::load(&self.prefs).theme();
                self.open(route);
            }
            Effect::Back => self.back(),
            Effect::OpenExternal(url) => {
                tracing::info!(url = %url, "Opening external link");
                self.opened.push(url);
            }
            Effect::ApplyTheme(theme) => {
                self.theme = theme;
            }
            Effect::Request(call) => {
                let completion = self.run(call).await;
                self.queue.push_back(completion);
            }
        }
    }

    async fn run(&self, call: AuthCall) -> Event {
        match call {
            AuthCall::Login(request) => {
                let result = self.auth.login(&request).await;
                LoginEvent::Completed(result).into()
            }
            AuthCall::Register(request) => {
                let result = self.auth.register(&request).await;
                RegisterEvent::Completed(result).into()
            }
        }
    }

    fn back(&mut self) {
        match self.history.pop() {
            Some(previous) => {
                let admission = admit(previous, &self.session());
                self.mount(admission.route());
            }
            None => tracing::debug!("No history to go back to"),
        }
    }

    fn mount(&mut self, route: Route) {
        let (screen, effects) = Screen::mount(route, &self.prefs);
        self.screen = screen;
        self.route = route;
        for effect in effects {
            if let Effect::ApplyTheme(theme) = effect {
                self.theme = theme;
            }
        }
    }
}
