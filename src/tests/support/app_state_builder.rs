//! Builds an `AppState` for handler tests. Every slot not overridden is
//! backed by stub ports, so a test only names the use case under test.

use std::sync::Arc;

use actix_web::web;

use crate::modules::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::modules::auth::application::ports::outgoing::token_blacklist::TokenBlacklist;
use crate::modules::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::auth::application::use_cases::{
    change_password::{ChangePasswordUseCase, IChangePasswordUseCase},
    delete_account::{DeleteAccountUseCase, IDeleteAccountUseCase},
    fetch_profile::{FetchProfileUseCase, IFetchProfileUseCase},
    forgot_password::{ForgotPasswordUseCase, IForgotPasswordUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
    magic_link_login::{IMagicLinkLoginUseCase, MagicLinkLoginUseCase},
    refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase},
    request_magic_link::{IRequestMagicLinkUseCase, RequestMagicLinkUseCase},
    reset_password::{IResetPasswordUseCase, ResetPasswordUseCase},
    update_profile::{IUpdateProfileUseCase, UpdateProfileUseCase},
    verify_email::{IVerifyEmailUseCase, VerifyEmailUseCase},
};
use crate::modules::dashboard::application::use_cases::{
    create_layout::{CreateLayoutUseCase, ICreateLayoutUseCase},
    create_widget_preference::{CreateWidgetPreferenceUseCase, ICreateWidgetPreferenceUseCase},
    delete_layout::{DeleteLayoutUseCase, IDeleteLayoutUseCase},
    delete_widget_preference::{DeleteWidgetPreferenceUseCase, IDeleteWidgetPreferenceUseCase},
    get_layout::{GetLayoutUseCase, IGetLayoutUseCase},
    list_layouts::{IListLayoutsUseCase, ListLayoutsUseCase},
    list_widget_preferences::{IListWidgetPreferencesUseCase, ListWidgetPreferencesUseCase},
    update_layout::{IUpdateLayoutUseCase, UpdateLayoutUseCase},
    update_widget_preference::{IUpdateWidgetPreferenceUseCase, UpdateWidgetPreferenceUseCase},
};
use crate::tests::support::stubs::{
    InMemoryLayoutRepository, InMemoryResetTokenRepository, InMemoryWidgetPreferenceRepository,
    RecordingEmailNotifier, RecordingTokenBlacklist, RecordingUserRepository, StubPasswordHasher,
    StubTokenProvider, StubUserQuery,
};
use crate::{AppState, DashboardUseCases};

#[derive(Default)]
pub struct TestAppStateBuilder {
    register_user_orchestrator: Option<Arc<UserRegistrationOrchestrator>>,
    verify_email: Option<Arc<dyn IVerifyEmailUseCase>>,
    login_user: Option<Arc<dyn ILoginUserUseCase>>,
    refresh_token: Option<Arc<dyn IRefreshTokenUseCase>>,
    logout: Option<Arc<dyn ILogoutUseCase>>,
    request_magic_link: Option<Arc<dyn IRequestMagicLinkUseCase>>,
    magic_link_login: Option<Arc<dyn IMagicLinkLoginUseCase>>,
    forgot_password: Option<Arc<dyn IForgotPasswordUseCase>>,
    reset_password: Option<Arc<dyn IResetPasswordUseCase>>,
    change_password: Option<Arc<dyn IChangePasswordUseCase>>,
    fetch_profile: Option<Arc<dyn IFetchProfileUseCase>>,
    update_profile: Option<Arc<dyn IUpdateProfileUseCase>>,
    delete_account: Option<Arc<dyn IDeleteAccountUseCase>>,
    list_layouts: Option<Arc<dyn IListLayoutsUseCase>>,
    create_layout: Option<Arc<dyn ICreateLayoutUseCase>>,
    get_layout: Option<Arc<dyn IGetLayoutUseCase>>,
    update_layout: Option<Arc<dyn IUpdateLayoutUseCase>>,
    delete_layout: Option<Arc<dyn IDeleteLayoutUseCase>>,
    list_widget_preferences: Option<Arc<dyn IListWidgetPreferencesUseCase>>,
    create_widget_preference: Option<Arc<dyn ICreateWidgetPreferenceUseCase>>,
    update_widget_preference: Option<Arc<dyn IUpdateWidgetPreferenceUseCase>>,
    delete_widget_preference: Option<Arc<dyn IDeleteWidgetPreferenceUseCase>>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    token_blacklist: Option<Arc<dyn TokenBlacklist>>,
}

impl TestAppStateBuilder {
    pub fn with_register_orchestrator(
        mut self,
        orchestrator: Arc<UserRegistrationOrchestrator>,
    ) -> Self {
        self.register_user_orchestrator = Some(orchestrator);
        self
    }

    pub fn with_verify_email(mut self, use_case: impl IVerifyEmailUseCase + 'static) -> Self {
        self.verify_email = Some(Arc::new(use_case));
        self
    }

    pub fn with_login_user(mut self, use_case: impl ILoginUserUseCase + 'static) -> Self {
        self.login_user = Some(Arc::new(use_case));
        self
    }

    pub fn with_refresh_token(mut self, use_case: impl IRefreshTokenUseCase + 'static) -> Self {
        self.refresh_token = Some(Arc::new(use_case));
        self
    }

    pub fn with_logout(mut self, use_case: impl ILogoutUseCase + 'static) -> Self {
        self.logout = Some(Arc::new(use_case));
        self
    }

    pub fn with_request_magic_link(
        mut self,
        use_case: impl IRequestMagicLinkUseCase + 'static,
    ) -> Self {
        self.request_magic_link = Some(Arc::new(use_case));
        self
    }

    pub fn with_magic_link_login(
        mut self,
        use_case: impl IMagicLinkLoginUseCase + 'static,
    ) -> Self {
        self.magic_link_login = Some(Arc::new(use_case));
        self
    }

    pub fn with_forgot_password(mut self, use_case: impl IForgotPasswordUseCase + 'static) -> Self {
        self.forgot_password = Some(Arc::new(use_case));
        self
    }

    pub fn with_reset_password(mut self, use_case: impl IResetPasswordUseCase + 'static) -> Self {
        self.reset_password = Some(Arc::new(use_case));
        self
    }

    pub fn with_change_password(mut self, use_case: impl IChangePasswordUseCase + 'static) -> Self {
        self.change_password = Some(Arc::new(use_case));
        self
    }

    pub fn with_fetch_profile(mut self, use_case: impl IFetchProfileUseCase + 'static) -> Self {
        self.fetch_profile = Some(Arc::new(use_case));
        self
    }

    pub fn with_update_profile(mut self, use_case: impl IUpdateProfileUseCase + 'static) -> Self {
        self.update_profile = Some(Arc::new(use_case));
        self
    }

    pub fn with_delete_account(mut self, use_case: impl IDeleteAccountUseCase + 'static) -> Self {
        self.delete_account = Some(Arc::new(use_case));
        self
    }

    pub fn with_list_layouts(mut self, use_case: impl IListLayoutsUseCase + 'static) -> Self {
        self.list_layouts = Some(Arc::new(use_case));
        self
    }

    pub fn with_create_layout(mut self, use_case: impl ICreateLayoutUseCase + 'static) -> Self {
        self.create_layout = Some(Arc::new(use_case));
        self
    }

    pub fn with_get_layout(mut self, use_case: impl IGetLayoutUseCase + 'static) -> Self {
        self.get_layout = Some(Arc::new(use_case));
        self
    }

    pub fn with_update_layout(mut self, use_case: impl IUpdateLayoutUseCase + 'static) -> Self {
        self.update_layout = Some(Arc::new(use_case));
        self
    }

    pub fn with_delete_layout(mut self, use_case: impl IDeleteLayoutUseCase + 'static) -> Self {
        self.delete_layout = Some(Arc::new(use_case));
        self
    }

    pub fn with_list_widget_preferences(
        mut self,
        use_case: impl IListWidgetPreferencesUseCase + 'static,
    ) -> Self {
        self.list_widget_preferences = Some(Arc::new(use_case));
        self
    }

    pub fn with_create_widget_preference(
        mut self,
        use_case: impl ICreateWidgetPreferenceUseCase + 'static,
    ) -> Self {
        self.create_widget_preference = Some(Arc::new(use_case));
        self
    }

    pub fn with_update_widget_preference(
        mut self,
        use_case: impl IUpdateWidgetPreferenceUseCase + 'static,
    ) -> Self {
        self.update_widget_preference = Some(Arc::new(use_case));
        self
    }

    pub fn with_delete_widget_preference(
        mut self,
        use_case: impl IDeleteWidgetPreferenceUseCase + 'static,
    ) -> Self {
        self.delete_widget_preference = Some(Arc::new(use_case));
        self
    }

    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    pub fn with_token_blacklist(mut self, blacklist: Arc<dyn TokenBlacklist>) -> Self {
        self.token_blacklist = Some(blacklist);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let token_provider = self
            .token_provider
            .unwrap_or_else(|| Arc::new(StubTokenProvider::default()));
        let token_blacklist = self
            .token_blacklist
            .unwrap_or_else(|| Arc::new(RecordingTokenBlacklist::default()));

        let query = Arc::new(StubUserQuery::default());
        let repository = Arc::new(RecordingUserRepository::default());
        let hasher = Arc::new(StubPasswordHasher::default());
        let reset_tokens = Arc::new(InMemoryResetTokenRepository::default());
        let notifier = RecordingEmailNotifier::arc();
        let layouts = Arc::new(InMemoryLayoutRepository::default());
        let widget_prefs = Arc::new(InMemoryWidgetPreferenceRepository::default());

        let dashboard = DashboardUseCases {
            list_layouts: self
                .list_layouts
                .unwrap_or_else(|| Arc::new(ListLayoutsUseCase::new(layouts.clone()))),
            create_layout: self
                .create_layout
                .unwrap_or_else(|| Arc::new(CreateLayoutUseCase::new(layouts.clone()))),
            get_layout: self
                .get_layout
                .unwrap_or_else(|| Arc::new(GetLayoutUseCase::new(layouts.clone()))),
            update_layout: self
                .update_layout
                .unwrap_or_else(|| Arc::new(UpdateLayoutUseCase::new(layouts.clone()))),
            delete_layout: self
                .delete_layout
                .unwrap_or_else(|| Arc::new(DeleteLayoutUseCase::new(layouts))),
            list_widget_preferences: self.list_widget_preferences.unwrap_or_else(|| {
                Arc::new(ListWidgetPreferencesUseCase::new(widget_prefs.clone()))
            }),
            create_widget_preference: self.create_widget_preference.unwrap_or_else(|| {
                Arc::new(CreateWidgetPreferenceUseCase::new(widget_prefs.clone()))
            }),
            update_widget_preference: self.update_widget_preference.unwrap_or_else(|| {
                Arc::new(UpdateWidgetPreferenceUseCase::new(widget_prefs.clone()))
            }),
            delete_widget_preference: self
                .delete_widget_preference
                .unwrap_or_else(|| Arc::new(DeleteWidgetPreferenceUseCase::new(widget_prefs))),
        };

        let state = AppState {
            register_user_orchestrator: self.register_user_orchestrator.unwrap_or_else(|| {
                Arc::new(UserRegistrationOrchestrator::new(
                    query.clone(),
                    repository.clone(),
                    hasher.clone(),
                    notifier.clone(),
                ))
            }),
            verify_email_use_case: self.verify_email.unwrap_or_else(|| {
                Arc::new(VerifyEmailUseCase::new(
                    token_provider.clone(),
                    repository.clone(),
                ))
            }),
            login_user_use_case: self.login_user.unwrap_or_else(|| {
                Arc::new(LoginUserUseCase::new(
                    query.clone(),
                    hasher.clone(),
                    token_provider.clone(),
                ))
            }),
            refresh_token_use_case: self.refresh_token.unwrap_or_else(|| {
                Arc::new(RefreshTokenUseCase::new(
                    token_provider.clone(),
                    token_blacklist.clone(),
                ))
            }),
            logout_use_case: self.logout.unwrap_or_else(|| {
                Arc::new(LogoutUseCase::new(
                    token_blacklist.clone(),
                    token_provider.clone(),
                ))
            }),
            request_magic_link_use_case: self.request_magic_link.unwrap_or_else(|| {
                Arc::new(RequestMagicLinkUseCase::new(
                    query.clone(),
                    notifier.clone(),
                ))
            }),
            magic_link_login_use_case: self.magic_link_login.unwrap_or_else(|| {
                Arc::new(MagicLinkLoginUseCase::new(
                    token_provider.clone(),
                    query.clone(),
                ))
            }),
            forgot_password_use_case: self.forgot_password.unwrap_or_else(|| {
                Arc::new(ForgotPasswordUseCase::new(
                    query.clone(),
                    reset_tokens.clone(),
                    notifier.clone(),
                ))
            }),
            reset_password_use_case: self.reset_password.unwrap_or_else(|| {
                Arc::new(ResetPasswordUseCase::new(
                    reset_tokens,
                    hasher.clone(),
                    repository.clone(),
                ))
            }),
            change_password_use_case: self.change_password.unwrap_or_else(|| {
                Arc::new(ChangePasswordUseCase::new(
                    hasher,
                    repository.clone(),
                    token_blacklist.clone(),
                ))
            }),
            fetch_profile_use_case: self
                .fetch_profile
                .unwrap_or_else(|| Arc::new(FetchProfileUseCase::new(query))),
            update_profile_use_case: self
                .update_profile
                .unwrap_or_else(|| Arc::new(UpdateProfileUseCase::new(repository.clone()))),
            delete_account_use_case: self.delete_account.unwrap_or_else(|| {
                Arc::new(DeleteAccountUseCase::new(
                    repository,
                    token_blacklist.clone(),
                ))
            }),
            dashboard,
            token_provider,
            token_blacklist,
        };

        web::Data::new(state)
    }
}
