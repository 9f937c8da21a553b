use axum::Router;

pub fn merge<S: Clone + Send + Sync + 'static>(a: Router<S>, b: Router<S>) -> Router<S> {
    Router::new().merge(a).merge(b)
}

pub fn merge_vec<S: Clone + Send + Sync + 'static>(routers: Vec<Router<S>>) -> Router<S> {
    let mut router = Router::new();
    for r in routers {
        router = merge(router, r);
    }
    router
}
