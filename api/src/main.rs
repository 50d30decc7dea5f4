//! Campus Hub API Server
//!
//! Attendance, lost & found, complaints, messages, notes and a teacher
//! directory for one campus community.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    create_schema, LocalFileStorage, PostgresAttendanceRepository, PostgresComplaintRepository,
    PostgresLostFoundRepository, PostgresMessageRepository, PostgresNoteRepository,
    PostgresSessionRepository, PostgresStudentRepository, PostgresTeacherRepository,
    PostgresUserRepository,
};
use app::{
    AttendanceService, AuthService, ComplaintService, DashboardService, LostFoundService,
    MessageService, NoteService, TeacherService,
};
use config::Config;
use domain::ports::FileStorage;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresUserRepository, PostgresSessionRepository>>,
    pub dashboard_service: Arc<
        DashboardService<
            PostgresStudentRepository,
            PostgresTeacherRepository,
            PostgresAttendanceRepository,
            PostgresComplaintRepository,
            PostgresLostFoundRepository,
        >,
    >,
    pub attendance_service: Arc<
        AttendanceService<
            PostgresStudentRepository,
            PostgresAttendanceRepository,
            PostgresUserRepository,
        >,
    >,
    pub lost_found_service: Arc<
        LostFoundService<PostgresLostFoundRepository, PostgresUserRepository, LocalFileStorage>,
    >,
    pub complaint_service:
        Arc<ComplaintService<PostgresComplaintRepository, PostgresUserRepository>>,
    pub message_service:
        Arc<MessageService<PostgresMessageRepository, PostgresUserRepository, LocalFileStorage>>,
    pub note_service:
        Arc<NoteService<PostgresNoteRepository, PostgresUserRepository, LocalFileStorage>>,
    pub teacher_service: Arc<TeacherService<PostgresTeacherRepository>>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,campus_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Campus Hub API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    create_schema(&db)
        .await
        .context("Failed to create database schema")?;
    tracing::info!("Database connected");

    // Upload directories
    let storage = Arc::new(LocalFileStorage::new(config.upload_dir.clone()));
    storage
        .ensure_layout()
        .await
        .context("Failed to prepare upload directories")?;

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let session_repo = Arc::new(PostgresSessionRepository::new(db.clone()));
    let student_repo = Arc::new(PostgresStudentRepository::new(db.clone()));
    let attendance_repo = Arc::new(PostgresAttendanceRepository::new(db.clone()));
    let lost_found_repo = Arc::new(PostgresLostFoundRepository::new(db.clone()));
    let complaint_repo = Arc::new(PostgresComplaintRepository::new(db.clone()));
    let message_repo = Arc::new(PostgresMessageRepository::new(db.clone()));
    let note_repo = Arc::new(PostgresNoteRepository::new(db.clone()));
    let teacher_repo = Arc::new(PostgresTeacherRepository::new(db.clone()));

    // Create application services
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        session_repo,
        config.teacher_secret_code.clone(),
        chrono::Duration::hours(config.session_ttl_hours),
    ));

    if auth_service
        .ensure_admin(&config.admin_phone, &config.admin_password)
        .await
        .context("Failed to seed admin user")?
    {
        tracing::warn!(phone = %config.admin_phone, "Seeded admin account, change its password");
    }

    let dashboard_service = Arc::new(DashboardService::new(
        student_repo.clone(),
        teacher_repo.clone(),
        attendance_repo.clone(),
        complaint_repo.clone(),
        lost_found_repo.clone(),
    ));

    let attendance_service = Arc::new(AttendanceService::new(
        student_repo,
        attendance_repo,
        user_repo.clone(),
    ));

    let lost_found_service = Arc::new(LostFoundService::new(
        lost_found_repo,
        user_repo.clone(),
        storage.clone(),
        config.max_image_bytes,
    ));

    let complaint_service = Arc::new(ComplaintService::new(complaint_repo, user_repo.clone()));

    let message_service = Arc::new(MessageService::new(
        message_repo,
        user_repo.clone(),
        storage.clone(),
    ));

    let note_service = Arc::new(NoteService::new(note_repo, user_repo, storage.clone()));

    let teacher_service = Arc::new(TeacherService::new(teacher_repo));

    // Create app state
    let state = AppState {
        auth_service,
        dashboard_service,
        attendance_service,
        lost_found_service,
        complaint_service,
        message_service,
        note_service,
        teacher_service,
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Rate-limited routes (registration, login)
    let rate_limited_routes = Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Protected routes
    let protected_routes = Router::new()
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/me", get(handlers::me))
        .route("/dashboard", get(handlers::dashboard))
        // Attendance and roster
        .route(
            "/attendance",
            get(handlers::get_attendance).post(handlers::mark_attendance),
        )
        .route(
            "/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/students/:id",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        .route(
            "/students/:id/attendance",
            get(handlers::student_attendance),
        )
        // Lost & found
        .route(
            "/lost-found",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/lost-found/:id", delete(handlers::delete_post))
        .route("/lost-found/:id/resolve", post(handlers::toggle_post))
        // Complaints
        .route(
            "/complaints",
            get(handlers::list_complaints).post(handlers::create_complaint),
        )
        .route("/complaints/:id", delete(handlers::delete_complaint))
        .route("/complaints/:id/resolve", post(handlers::toggle_complaint))
        // Message board
        .route(
            "/messages",
            get(handlers::list_messages).post(handlers::create_message),
        )
        .route("/messages/:id", delete(handlers::delete_message))
        // Notes
        .route("/notes", get(handlers::list_notes).post(handlers::create_note))
        .route("/notes/:id", delete(handlers::delete_note))
        // Teacher directory
        .route(
            "/teachers",
            get(handlers::list_teachers).post(handlers::create_teacher),
        )
        .route(
            "/teachers/:id",
            get(handlers::get_teacher)
                .put(handlers::update_teacher)
                .delete(handlers::delete_teacher),
        )
        .route("/chatbot", post(handlers::chat))
        // Stored attachments
        .nest_service("/uploads", ServeDir::new(storage.root()))
        .layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            auth::auth_middleware::<PostgresUserRepository, PostgresSessionRepository>,
        ));

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(rate_limited_routes)
        .merge(protected_routes)
        .fallback(handlers::not_found)
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
