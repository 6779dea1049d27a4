use std::convert::Infallible;
use std::sync::Arc;

use tracing::{debug, info};
use tvns_app::DeviceController;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::path::FullPath;
use warp::{Filter, Reply};

/// Command bodies are a wire name and an optional number
const MAX_BODY_BYTES: u64 = 1024;

/// 设备命令路由
///
/// Any POST is accepted; the body names the command. The path is only logged,
/// so clients may post to `/tvnsmanager/` or `/tvnsmanager/<command>` alike.
pub fn route(
    controller: Arc<DeviceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::post()
        .and(warp::path::full())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_controller(controller))
        .map(handle_command)
}

/// 注入设备控制器
fn with_controller(
    controller: Arc<DeviceController>,
) -> impl Filter<Extract = (Arc<DeviceController>,), Error = Infallible> + Clone {
    warp::any().map(move || controller.clone())
}

/// 处理命令请求
fn handle_command(path: FullPath, body: Bytes, controller: Arc<DeviceController>) -> impl Reply {
    let text = String::from_utf8_lossy(&body);
    debug!(path = path.as_str(), body = %text.trim(), "command request");

    let response = controller.handle_body(&text);
    let status =
        StatusCode::from_u16(response.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    info!(
        status = status.as_u16(),
        outcome = ?response.outcome,
        state = %response.state,
        "{}",
        response.message
    );

    warp::reply::with_status(warp::reply::json(&response), status)
}
