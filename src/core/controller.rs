//! View controller: the signed-out / signed-in gate.
//!
//! Entering `SignedIn` stamps `lastViewedAt`, subscribes to the preference
//! record and starts the time source. Leaving it cancels both. Collaborator
//! failures are passed through unchanged; nothing is retried here.

use crate::cloud::CloudService;
use crate::core::clock::Clock;
use crate::core::preferences::{PreferenceStore, Subscription};
use crate::core::screen::{AccountDetails, ClockFace, ClockScreen, Screen};
use crate::core::ticker::{CancelToken, TimeSource};
use crate::errors::{AppError, AppResult};
use crate::models::{ClockPreferences, PreferenceField, SyncStatus, User};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    SignedOut,
    SignedIn,
}

struct SignedInView<S: CloudService, C: Clock> {
    user: User,
    store: PreferenceStore<S>,
    ticker: TimeSource<Rc<C>>,
    face: Rc<RefCell<ClockFace>>,
    subscription: Option<Subscription>,
}

impl<S: CloudService, C: Clock> SignedInView<S, C> {
    fn teardown(&mut self) {
        self.ticker.cancel();
        if let Some(sub) = self.subscription.take() {
            sub.cancel();
        }
    }
}

impl<S: CloudService, C: Clock> Drop for SignedInView<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

pub struct ViewController<S: CloudService + 'static, C: Clock + 'static> {
    service: Rc<RefCell<S>>,
    clock: Rc<C>,
    tick: Duration,
    session: Option<SignedInView<S, C>>,
}

impl<S: CloudService + 'static, C: Clock + 'static> ViewController<S, C> {
    /// Build the controller in the state matching the current auth session.
    /// An existing session is a session open: `lastViewedAt` is stamped.
    pub fn open(service: Rc<RefCell<S>>, clock: Rc<C>, tick: Duration) -> Self {
        let current = service.borrow().current_user();
        let mut controller = Self {
            service,
            clock,
            tick,
            session: None,
        };
        if let Some(user) = current {
            controller.enter_signed_in(user);
        }
        controller
    }

    pub fn state(&self) -> ViewState {
        if self.session.is_some() {
            ViewState::SignedIn
        } else {
            ViewState::SignedOut
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// `SignedOut -> SignedIn`. No-op when already signed in.
    pub fn sign_in(&mut self) -> AppResult<()> {
        if self.session.is_some() {
            return Ok(());
        }
        let user = self.service.borrow_mut().sign_in()?;
        self.enter_signed_in(user);
        Ok(())
    }

    /// `SignedIn -> SignedOut`: stops the time source and drops the
    /// preference subscription.
    pub fn sign_out(&mut self) -> AppResult<()> {
        self.service.borrow_mut().sign_out()?;
        if let Some(mut view) = self.session.take() {
            view.teardown();
        }
        Ok(())
    }

    /// Wait for the next timestamp, pull remote changes and redraw.
    /// `None` once signed out, including a sign-out made by another session.
    pub fn tick(&mut self) -> Option<i64> {
        let ts = self.session.as_mut()?.ticker.next()?;
        let view = self.follow_auth_session()?;
        view.store.refresh();
        view.face.borrow_mut().apply_tick(ts);
        Some(ts)
    }

    /// Pull remote changes without waiting for a tick.
    pub fn refresh(&mut self) -> bool {
        match self.follow_auth_session() {
            Some(view) => view.store.refresh(),
            None => false,
        }
    }

    pub fn toggle(&mut self, field: PreferenceField) -> AppResult<()> {
        self.signed_in_mut()?.store.toggle(field);
        Ok(())
    }

    pub fn set_preference(&mut self, field: PreferenceField, value: bool) -> AppResult<()> {
        self.signed_in_mut()?.store.set_field(field, value);
        Ok(())
    }

    pub fn preferences(&self) -> Option<(ClockPreferences, SyncStatus)> {
        self.session.as_ref().map(|s| s.store.read())
    }

    pub fn face(&self) -> Option<ClockFace> {
        self.session.as_ref().map(|s| s.face.borrow().clone())
    }

    /// Token of the running time source, if any.
    pub fn time_source_token(&self) -> Option<CancelToken> {
        self.session.as_ref().map(|s| s.ticker.cancel_token())
    }

    /// Run the "manage subscription" action. `Ok(false)` when the
    /// collaborator does not offer it.
    pub fn manage_subscription(&mut self) -> AppResult<bool> {
        let identity = self.signed_in()?.user.identity();
        let mut service = self.service.borrow_mut();
        if !service.can_subscribe(&identity) {
            return Ok(false);
        }
        service.subscribe(&identity)?;
        Ok(true)
    }

    pub fn screen(&self) -> Screen {
        match &self.session {
            None => Screen::SignIn,
            Some(view) => {
                let identity = view.user.identity();
                let service = self.service.borrow();
                Screen::Clock(ClockScreen {
                    user: view.user.clone(),
                    face: view.face.borrow().clone(),
                    account: AccountDetails::new(
                        service.usage(&identity),
                        service.subscription_status(&identity),
                        service.can_subscribe(&identity),
                    ),
                })
            }
        }
    }

    fn signed_in(&self) -> AppResult<&SignedInView<S, C>> {
        self.session.as_ref().ok_or(AppError::NotSignedIn)
    }

    fn signed_in_mut(&mut self) -> AppResult<&mut SignedInView<S, C>> {
        self.session.as_mut().ok_or(AppError::NotSignedIn)
    }

    /// Leave `SignedIn` when the auth session ended or now belongs to
    /// another identity.
    fn follow_auth_session(&mut self) -> Option<&mut SignedInView<S, C>> {
        let identity = self.session.as_ref()?.user.identity();
        let current = self.service.borrow().current_user();
        if current.map(|u| u.identity()) != Some(identity) {
            if let Some(mut view) = self.session.take() {
                view.teardown();
            }
            return None;
        }
        self.session.as_mut()
    }

    fn enter_signed_in(&mut self, user: User) {
        let clock: Rc<dyn Clock> = self.clock.clone();
        let store = PreferenceStore::open_session(self.service.clone(), user.identity(), clock);

        let (prefs, status) = store.read();
        let face = Rc::new(RefCell::new(ClockFace::new(prefs, status)));
        let subscription = {
            let face = face.clone();
            store.on_change(move |p, s| face.borrow_mut().apply_prefs(*p, s))
        };

        let mut ticker = TimeSource::start(self.clock.clone(), self.tick);
        if let Some(ts) = ticker.next() {
            face.borrow_mut().apply_tick(ts);
        }

        self.session = Some(SignedInView {
            user,
            store,
            ticker,
            face,
            subscription: Some(subscription),
        });
    }
}
