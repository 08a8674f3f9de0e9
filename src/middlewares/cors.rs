use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // storefront dev origins; extend via a reverse proxy in production
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Content-Type", "Authorization", "X-Requested-With"])
        .supports_credentials()
        .max_age(3600)
}
