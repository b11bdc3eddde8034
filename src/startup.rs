use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use crate::services::{feedback::FeedbackRepository, FeedbackPolicy, FeedbackService};
use crate::views::pages::Templates;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    repository: Arc<dyn FeedbackRepository>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let feedback_service = FeedbackService::new(
        repository,
        FeedbackPolicy {
            one_per_user_per_product: settings.feedback.one_per_user_per_product,
        },
    );
    let feedback_service = web::Data::new(feedback_service);

    let templates = Templates::new()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, format!("{err:#}")))?;
    let templates = web::Data::new(templates);

    let settings = web::Data::new(settings);

    let oauth_http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let oauth_http_client = web::Data::new(oauth_http_client);

    let oauth_cache = web::Data::new(middleware::authentication::OAuthCache::new(
        Duration::from_secs(60),
    ));

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Invalid JSON at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            err => format!("Invalid request body: {}", err),
        };
        JsonResponse::<()>::build().bad_request(msg)
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        JsonResponse::<()>::build().bad_request(format!("Invalid query: {}", err))
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/feedback")
                    .service(routes::feedback::list_handler)
                    .service(routes::feedback::item_handler)
                    .service(routes::feedback::add_handler)
                    .service(routes::feedback::edit_handler)
                    .service(routes::feedback::delete_handler),
            )
            .service(
                web::scope("/products")
                    .service(routes::pages::product_page)
                    .service(routes::pages::product_submit),
            )
            .service(
                web::scope("/admin/feedback")
                    .service(routes::pages::admin_table)
                    .service(routes::pages::admin_item)
                    .service(routes::pages::admin_edit)
                    .service(routes::pages::admin_delete),
            )
            .app_data(json_config.clone())
            .app_data(query_config.clone())
            .app_data(feedback_service.clone())
            .app_data(templates.clone())
            .app_data(oauth_http_client.clone())
            .app_data(oauth_cache.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
