use crate::sync;

pub async fn metadata() {
    sync::run_all(false, true).await;
}
