use crate::sync;

pub async fn sync(force: bool) {
    sync::run_all(force, false).await;
}
