use axum::{routing::post, Router};
use citycare_app::AppContext;
use citycare_ui::App;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use tower_http::compression::CompressionLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let app_context = match AppContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name("citycare.sid")
        .with_secure(app_context.config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(
            app_context.config.session_hours,
        )));

    let routes = generate_route_list(App);

    let app = Router::new()
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        "Sessions expire after {}h of inactivity",
        app_context.config.session_hours
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🏙️</text></svg>"/>
                <style>{CSS}</style>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

const CSS: &str = r#"
:root {
    --base: #f5f7fa;
    --surface: #ffffff;
    --overlay: #e3e8ef;
    --muted: #8a94a6;
    --subtle: #5b6577;
    --text: #1f2a3d;
    --love: #c0392b;
    --gold: #e6a23c;
    --pine: #1f6f8b;
    --foam: #3aa17e;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Inter', -apple-system, sans-serif;
    background: var(--base);
    color: var(--text);
    min-height: 100vh;
}
a { color: var(--pine); }
.container { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
.navbar {
    display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap;
    gap: 1rem; padding: 1rem 1.5rem; background: var(--surface); border-bottom: 2px solid var(--overlay);
}
.navbar__brand { font-weight: 800; font-size: 1.3rem; color: var(--pine); text-decoration: none; }
.navbar__links { display: flex; align-items: center; gap: 1rem; flex-wrap: wrap; }
.navbar__link { text-decoration: none; font-weight: 500; }
.navbar__role { color: var(--muted); font-size: 0.85rem; }
.navbar__logout { padding: 0.4rem 0.9rem; border: 1px solid var(--love); color: var(--love); background: none; border-radius: 6px; cursor: pointer; }
.hero { text-align: center; padding: 3rem 0 2rem; }
.hero__title { font-size: clamp(2rem, 5vw, 3rem); color: var(--pine); font-weight: 800; margin-bottom: 0.75rem; }
.hero__subtitle { color: var(--subtle); font-size: 1.1rem; max-width: 560px; margin: 0 auto 1.5rem; }
.hero__actions { display: flex; justify-content: center; gap: 0.75rem; flex-wrap: wrap; }
.page-header { display: flex; justify-content: space-between; align-items: center; gap: 1rem; margin-bottom: 1rem; }
.page-title { font-size: 1.6rem; margin-bottom: 1rem; }
.page-empty { color: var(--muted); font-style: italic; padding: 2rem 0; }
.button {
    display: inline-block; padding: 0.6rem 1.2rem; background: var(--surface); color: var(--text);
    border: 2px solid var(--overlay); border-radius: 8px; font-weight: 600; cursor: pointer; text-decoration: none;
}
.button--primary { background: var(--pine); color: var(--surface); border-color: var(--pine); }
.button--danger { color: var(--love); border-color: var(--love); }
.button:disabled { opacity: 0.5; cursor: not-allowed; }
.form { display: flex; flex-direction: column; gap: 0.9rem; background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1.5rem; margin-bottom: 1.5rem; }
.form__title { color: var(--pine); }
.form__group { border: 1px solid var(--overlay); border-radius: 8px; padding: 1rem; display: grid; gap: 0.6rem; }
.field { display: flex; flex-direction: column; gap: 0.3rem; }
.field--inline { flex-direction: row; align-items: center; gap: 0.5rem; }
.field__label { font-size: 0.9rem; color: var(--subtle); }
.field__input { padding: 0.7rem 0.9rem; border: 2px solid var(--overlay); border-radius: 8px; background: var(--surface); color: var(--text); font-size: 1rem; }
.field__input:focus { outline: none; border-color: var(--pine); }
.field__input--area { min-height: 5rem; resize: vertical; }
.field-error { color: var(--love); font-size: 0.9rem; }
.address-book { margin-top: 1.5rem; }
.address-book__actions { display: flex; gap: 0.5rem; }
.notice { background: #e6f6ef; border: 2px solid var(--foam); border-radius: 8px; padding: 0.75rem 1rem; color: #20694f; margin-bottom: 1rem; }
.issue-list { display: grid; gap: 1rem; }
.issue-card { background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1.25rem; display: grid; gap: 0.6rem; }
.issue-card__header { display: flex; justify-content: space-between; align-items: center; gap: 1rem; }
.issue-card__title { font-size: 1.15rem; }
.issue-card__category { color: var(--pine); font-weight: 600; font-size: 0.9rem; }
.issue-card__address, .issue-card__technicians, .issue-card__date { color: var(--subtle); font-size: 0.9rem; }
.issue-card__photos { display: flex; gap: 0.5rem; flex-wrap: wrap; }
.issue-card__photo { width: 120px; height: 90px; object-fit: cover; border-radius: 6px; }
.issue-card__footer { display: flex; gap: 1rem; flex-wrap: wrap; align-items: center; }
.issue-card__actions { border-top: 1px solid var(--overlay); padding-top: 0.75rem; display: grid; gap: 0.75rem; }
.status { padding: 0.2rem 0.6rem; border-radius: 999px; font-size: 0.8rem; font-weight: 700; }
.status--pending { background: #fdf1dc; color: #8a5a00; }
.status--in_progress { background: #e1eef6; color: var(--pine); }
.status--resolved { background: #e6f6ef; color: #20694f; }
.status-buttons { display: flex; gap: 0.5rem; flex-wrap: wrap; }
.status-buttons__button { padding: 0.4rem 0.8rem; border: 2px solid var(--overlay); border-radius: 6px; background: var(--surface); cursor: pointer; }
.status-buttons__button.active { border-color: var(--pine); color: var(--pine); }
.confirm { width: 100%; background: #fff8e6; border: 2px solid var(--gold); border-radius: 8px; padding: 0.75rem; display: flex; gap: 0.5rem; align-items: center; flex-wrap: wrap; }
.votes { display: grid; gap: 0.6rem; }
.votes__counts { display: flex; gap: 0.5rem; }
.votes__button { padding: 0.4rem 0.9rem; border: 2px solid var(--overlay); border-radius: 999px; background: var(--surface); cursor: pointer; }
.votes__button.active { border-color: var(--pine); background: #e1eef6; }
.votes__comment { display: grid; gap: 0.5rem; }
.votes__comments { list-style: none; display: grid; gap: 0.4rem; }
.votes__comment-item { background: var(--base); border-radius: 6px; padding: 0.5rem 0.75rem; }
.votes__error { color: var(--love); font-size: 0.9rem; }
.assign__list { list-style: none; display: grid; gap: 0.3rem; margin: 0.5rem 0; }
.assign__item.suited { font-weight: 600; }
.assign__skills { color: var(--muted); font-size: 0.85rem; }
.roster { width: 100%; border-collapse: collapse; background: var(--surface); border-radius: 12px; }
.roster th, .roster td { text-align: left; padding: 0.6rem; border-bottom: 1px solid var(--overlay); }
.auth-page { max-width: 480px; margin: 2rem auto; }
.auth-page__alt { text-align: center; color: var(--subtle); }
.guard { text-align: center; padding: 3rem 0; display: grid; gap: 1rem; justify-items: center; }
.loading { display: flex; flex-direction: column; align-items: center; padding: 3rem; }
.loading__spinner {
    width: 50px; height: 50px; border: 4px solid var(--overlay);
    border-top-color: var(--pine); border-radius: 50%; animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.loading__text { margin-top: 1rem; color: var(--subtle); font-style: italic; }
.error { background: #fce8e6; border: 2px solid var(--love); border-radius: 8px; padding: 1.25rem; margin: 1rem 0; }
.error__title { color: var(--love); font-weight: 700; margin-bottom: 0.5rem; }
.error__message { color: #8b2d22; }
.error__retry { margin-top: 1rem; padding: 0.5rem 1rem; background: var(--love); color: var(--surface); border: none; border-radius: 4px; cursor: pointer; }
.sort-select { max-width: 220px; }
"#;
