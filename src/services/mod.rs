// Services layer - Business logic over the stores
pub mod assistant_service;
pub mod auth_service;
pub mod content;
pub mod crypto;
pub mod gemini_client;
pub mod rate_limiter;
pub mod registry_service;
pub mod responder;
pub mod security_monitor;
pub mod token_service;
pub mod vehicle_lookup_service;

pub use assistant_service::{AssistantService, Resposta};
pub use auth_service::{AuthService, Sessao, Usuario};
pub use gemini_client::{AnswerGenerator, GeminiClient};
pub use rate_limiter::{RateDecision, RateLimiter};
pub use registry_service::RegistryService;
pub use security_monitor::{ResumoSeguranca, SecurityMonitor};
pub use token_service::TokenService;
pub use vehicle_lookup_service::{LookupKind, LookupRequest, VehicleLookupService};
