//! Navigation and view mounting.
//!
//! The [`Router`] resolves paths against the route table, gates routes on the
//! session's role, renders the view and the vertical navigation, and mounts
//! the container the view needs. Containers ask for navigation through an
//! injected [`Navigate`] capability; the router queues those requests and
//! processes them once the container's handler returns.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::containers::{BillsList, ContainerContext, FileChange, Navigate, NewBillForm};
use crate::error::{BilledError, BilledResult};
use crate::models::{BillFormValues, SelectedFile, Session, UserType};
use crate::store::{BillsStore, SessionStore, current_session};
use crate::view::{Document, NavIcon, SubmitEvent, View};

/// Logical navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login page.
    Login,
    /// Employee bill list.
    Bills,
    /// Employee new-bill form.
    NewBill,
    /// Admin dashboard.
    Dashboard,
}

impl Route {
    /// Every route.
    pub const ALL: [Route; 4] = [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard];

    /// Role a session must have to reach this route; `None` for public routes.
    pub fn required_role(&self) -> Option<UserType> {
        match self {
            Route::Login => None,
            Route::Bills | Route::NewBill => Some(UserType::Employee),
            Route::Dashboard => Some(UserType::Admin),
        }
    }

    /// The route a session lands on.
    ///
    /// # Example
    ///
    /// ```
    /// use billed::models::Session;
    /// use billed::router::Route;
    ///
    /// assert_eq!(Route::landing(None), Route::Login);
    /// assert_eq!(Route::landing(Some(&Session::employee("a@a"))), Route::Bills);
    /// assert_eq!(Route::landing(Some(&Session::admin("admin@a"))), Route::Dashboard);
    /// ```
    pub fn landing(session: Option<&Session>) -> Route {
        match session.map(|s| s.user_type) {
            None => Route::Login,
            Some(UserType::Employee) => Route::Bills,
            Some(UserType::Admin) => Route::Dashboard,
        }
    }

    /// The route actually rendered when `session` asks for `self`.
    pub fn gate(self, session: Option<&Session>) -> Route {
        match (self.required_role(), session) {
            (None, _) => self,
            (Some(_), None) => Route::Login,
            (Some(role), Some(session)) if session.user_type == role => self,
            (Some(_), Some(session)) => Route::landing(Some(session)),
        }
    }
}

enum Mounted {
    None,
    Bills(BillsList),
    NewBill(NewBillForm),
}

/// Single-page router owning the rendered document.
pub struct Router {
    config: Arc<AppConfig>,
    session_store: Arc<dyn SessionStore>,
    store: Option<Arc<dyn BillsStore>>,
    document: Document,
    current: Option<Route>,
    mounted: Mounted,
    navigation_tx: mpsc::UnboundedSender<String>,
    navigation_rx: mpsc::UnboundedReceiver<String>,
}

impl Router {
    /// Creates a router. Nothing is rendered until [`Router::start`] or
    /// [`Router::on_navigate`] is called.
    pub fn new(
        config: AppConfig,
        session_store: Arc<dyn SessionStore>,
        store: Option<Arc<dyn BillsStore>>,
    ) -> Self {
        let (navigation_tx, navigation_rx) = mpsc::unbounded_channel();
        Self {
            config: Arc::new(config),
            session_store,
            store,
            document: Document::default(),
            current: None,
            mounted: Mounted::None,
            navigation_tx,
            navigation_rx,
        }
    }

    /// Returns a navigation capability bound to this router.
    ///
    /// Requests are queued and carried out by [`Router::process_pending`],
    /// which every event dispatcher calls before returning.
    pub fn navigator(&self) -> Navigate {
        let tx = self.navigation_tx.clone();
        Arc::new(move |path: &str| {
            if tx.send(path.to_string()).is_err() {
                warn!(path = %path, "Navigation requested after router shutdown");
            }
        })
    }

    /// The rendered document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The route currently rendered.
    pub fn current_route(&self) -> Option<Route> {
        self.current
    }

    /// The mounted bill list container, if any.
    pub fn bills_list(&self) -> Option<&BillsList> {
        match &self.mounted {
            Mounted::Bills(list) => Some(list),
            _ => None,
        }
    }

    /// The mounted new-bill container, if any.
    pub fn new_bill_form(&self) -> Option<&NewBillForm> {
        match &self.mounted {
            Mounted::NewBill(form) => Some(form),
            _ => None,
        }
    }

    /// Renders the initial view for the page location.
    ///
    /// Without a session this is always the login page. With one, `location`
    /// is honoured when it names a route, otherwise the role's landing route
    /// is shown.
    pub async fn start(&mut self, location: &str) {
        let session = self.session();
        let route = match (&session, self.config.routes.resolve(location)) {
            (None, _) => Route::Login,
            (Some(session), Some(route)) if route != Route::Login => route.gate(Some(session)),
            (Some(session), _) => Route::landing(Some(session)),
        };
        info!(location = %location, ?route, "Starting router");

        self.render(route, session).await;
        self.process_pending().await;
    }

    /// Navigates to `path`.
    ///
    /// Unknown paths leave the current view untouched.
    pub async fn on_navigate(&mut self, path: &str) {
        self.navigate_to(path).await;
        self.process_pending().await;
    }

    /// Carries out queued navigation requests, in order. Returns how many ran.
    pub async fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(path) = self.navigation_rx.try_recv() {
            self.navigate_to(&path).await;
            processed += 1;
        }
        processed
    }

    /// Selects `file` in the new-bill form's file input.
    ///
    /// Returns `Ok(None)` when the form is not mounted. Store failures are
    /// rendered into the error region above the form and returned; the form
    /// stays usable.
    pub async fn change_file(&mut self, file: SelectedFile) -> BilledResult<Option<FileChange>> {
        self.document.clear_form_feedback();
        let (Mounted::NewBill(form), Some(input)) =
            (&mut self.mounted, self.document.file_input_mut())
        else {
            debug!("File change ignored, new bill form not mounted");
            return Ok(None);
        };

        input.select(file);
        let result = form.handle_change_file(input).await;
        self.settle(result).await.map(Some)
    }

    /// Submits the new-bill form with `values`.
    ///
    /// Returns `Ok(false)` when the form is not mounted. Store failures are
    /// rendered into the error region, invalid fields into the form's
    /// validation message. Both are returned.
    pub async fn submit_new_bill(&mut self, values: BillFormValues) -> BilledResult<bool> {
        self.document.clear_form_feedback();
        let Mounted::NewBill(form) = &mut self.mounted else {
            debug!("Submit ignored, new bill form not mounted");
            return Ok(false);
        };

        let mut event = SubmitEvent::new(values);
        let result = form.handle_submit(&mut event).await;
        self.settle(result).await.map(|_| true)
    }

    /// Clicks the eye icon of the bill list row at `index`.
    ///
    /// Returns true when the preview modal was opened.
    pub fn click_icon_eye(&mut self, index: usize) -> bool {
        let (Mounted::Bills(list), View::Bills { rows }) = (&self.mounted, &self.document.root)
        else {
            return false;
        };
        let Some(row) = rows.get(index) else {
            warn!(index, "No bill row at index");
            return false;
        };

        list.handle_click_icon_eye(&mut self.document.modal, row);
        self.document.modal.is_open()
    }

    /// Clicks the bill list's new-bill button.
    pub async fn click_new_bill(&mut self) {
        if let Mounted::Bills(list) = &self.mounted {
            list.handle_click_new_bill();
        }
        self.process_pending().await;
    }

    async fn settle<T>(&mut self, result: BilledResult<T>) -> BilledResult<T> {
        if let Err(err) = &result {
            self.show_error(err);
        }
        self.process_pending().await;
        result
    }

    fn show_error(&mut self, err: &BilledError) {
        let message = err.error_message();
        if let View::NewBill {
            validation_message,
            error,
            ..
        } = &mut self.document.root
        {
            match err.status() {
                Some(status) => {
                    warn!(status, "Rendering store error above the form");
                    *error = Some(message);
                }
                None => {
                    debug!(error = %err, "Rendering form validation message");
                    *validation_message = Some(message);
                }
            }
            return;
        }

        match err.status() {
            Some(status) => {
                warn!(status, "Rendering error page");
                self.document.root = View::Error { message };
            }
            None => debug!(error = %err, "Validation error outside the form, nothing to render"),
        }
    }

    fn session(&self) -> Option<Session> {
        current_session(self.session_store.as_ref(), &self.config.session_key)
    }

    async fn navigate_to(&mut self, path: &str) {
        let Some(requested) = self.config.routes.resolve(path) else {
            warn!(path = %path, "Unknown path, ignoring navigation");
            return;
        };

        let session = self.session();
        let route = requested.gate(session.as_ref());
        if route != requested {
            info!(?requested, ?route, "Route not allowed for session, redirecting");
        }

        self.render(route, session).await;
    }

    fn context(&self, session: Session) -> ContainerContext {
        ContainerContext {
            on_navigate: self.navigator(),
            store: self.store.clone(),
            session,
            config: self.config.clone(),
        }
    }

    async fn render(&mut self, route: Route, session: Option<Session>) {
        debug!(?route, "Rendering route");
        self.document.modal.close();
        self.mounted = Mounted::None;
        self.current = Some(route);

        match (route, session) {
            (Route::Bills, Some(session)) => {
                self.document.layout.show(Some(NavIcon::Window));

                let list = BillsList::new(self.context(session));
                self.document.root = match list.get_bills().await {
                    Ok(rows) => View::Bills { rows },
                    Err(err) => View::Error {
                        message: err.error_message(),
                    },
                };
                self.mounted = Mounted::Bills(list);
            }
            (Route::NewBill, Some(session)) => {
                self.document.root = View::new_bill();
                self.document.layout.show(Some(NavIcon::Mail));
                self.mounted = Mounted::NewBill(NewBillForm::new(self.context(session)));
            }
            (Route::Dashboard, Some(_)) => {
                self.document.root = View::Dashboard;
                self.document.layout.show(None);
            }
            (Route::Login, _) | (_, None) => {
                self.current = Some(Route::Login);
                self.document.root = View::Login;
                self.document.layout.hide();
            }
        }
    }
}
