use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::Duration;
use consultancy::admin::DashboardService;
use consultancy::assistant::{ChatbotService, LanguageModel, OpenAiChatModel};
use consultancy::auth::{AdminRepository, AuthService, MemoryAdminRepository, TokenAuthority};
use consultancy::config::{AppConfig, AssistantConfig, EmailConfig};
use consultancy::content::ContentCatalogs;
use consultancy::notifications::{
    DispatchSettings, EmailTransport, LogTransport, NotificationDispatcher, SendGridTransport,
};
use consultancy::storage::ConnectionGate;
use consultancy::subscriptions::{MemorySubscriptionRepository, SubscriptionService};
use consultancy::workflows::leads::{LeadService, MemoryLeadRepository};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) gate: ConnectionGate,
}

/// Every service the HTTP surface needs, wired against in-memory stores.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) leads: Arc<LeadService<MemoryLeadRepository>>,
    pub(crate) auth: Arc<AuthService>,
    pub(crate) tokens: Arc<TokenAuthority>,
    pub(crate) subscriptions: Arc<SubscriptionService>,
    pub(crate) content: ContentCatalogs,
    pub(crate) chatbot: Arc<ChatbotService>,
    pub(crate) dashboard: Arc<DashboardService>,
}

impl Services {
    pub(crate) fn build(config: &AppConfig) -> Self {
        Self::with_transport(config, email_transport(&config.email))
    }

    pub(crate) fn with_transport(config: &AppConfig, transport: Arc<dyn EmailTransport>) -> Self {
        let dispatcher = NotificationDispatcher::new(
            transport,
            DispatchSettings {
                from_address: config.email.from_address.clone(),
                admin_address: config.email.admin_address.clone(),
                client_url: config.email.client_url.clone(),
            },
        );

        let lead_repository = Arc::new(MemoryLeadRepository::default());
        let leads = Arc::new(LeadService::new(lead_repository.clone(), dispatcher.clone()));

        let subscriptions = Arc::new(SubscriptionService::new(
            Arc::new(MemorySubscriptionRepository::default()),
            dispatcher,
        ));

        let tokens = Arc::new(TokenAuthority::new(
            &config.auth.jwt_secret,
            Duration::hours(config.auth.token_ttl_hours),
        ));
        let admins: Arc<dyn AdminRepository> = Arc::new(MemoryAdminRepository::default());
        let auth = Arc::new(AuthService::new(
            admins,
            tokens.clone(),
            config.auth.bcrypt_rounds,
        ));

        let content = ContentCatalogs::in_memory();
        let dashboard = Arc::new(DashboardService::new(
            lead_repository,
            subscriptions.clone(),
            content.stats(),
        ));
        let chatbot = Arc::new(ChatbotService::new(language_model(&config.assistant)));

        Self {
            leads,
            auth,
            tokens,
            subscriptions,
            content,
            chatbot,
            dashboard,
        }
    }
}

pub(crate) fn email_transport(config: &EmailConfig) -> Arc<dyn EmailTransport> {
    match &config.sendgrid_api_key {
        Some(key) => Arc::new(SendGridTransport::new(key.clone())),
        None => Arc::new(LogTransport),
    }
}

pub(crate) fn language_model(config: &AssistantConfig) -> Option<Arc<dyn LanguageModel>> {
    config.openai_api_key.as_ref().map(|key| {
        Arc::new(OpenAiChatModel::new(key.clone(), config.model.clone())) as Arc<dyn LanguageModel>
    })
}
