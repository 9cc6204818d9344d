#[macro_use]
extern crate rocket;

use rocket::response::content;
use rocket::serde::json::Json;
use rocket::State;
use rocket_cors::{AllowedOrigins, CorsOptions};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};

use risk_board_map::session::{
    NewBoardData, Request, ResetData, Session, SetOwnerData, SetTroopsData,
};

#[derive(Serialize, Debug)]
struct ApiResponse {
    data: Option<Value>,
    error: Option<String>,
}

impl ApiResponse {
    fn success(data: Value) -> Self {
        ApiResponse {
            data: Some(data),
            error: None,
        }
    }

    fn error(error: String) -> Self {
        ApiResponse {
            data: None,
            error: Some(error),
        }
    }
}

struct RequestWithResponse {
    request: Request,
    response_sender: oneshot::Sender<ApiResponse>,
}

struct SharedState {
    sender: mpsc::Sender<RequestWithResponse>,
}

#[derive(Serialize)]
struct ApiEndpoint {
    path: String,
    method: String,
    description: String,
}

#[get("/")]
fn api_documentation() -> content::RawJson<String> {
    let endpoints = [
        ("/", "GET", "Shows this API documentation"),
        ("/board", "GET", "Get every territory and continent"),
        ("/territory/<name>", "GET", "Get one territory"),
        (
            "/closest-enemy/<name>",
            "GET",
            "Hops from a territory to the nearest enemy, null if none is reachable",
        ),
        (
            "/connected/<from>/<to>",
            "GET",
            "Whether two territories are joined by their owner's territory",
        ),
        (
            "/fortify-targets/<name>",
            "GET",
            "Territories armies could be fortified to from a territory",
        ),
        ("/set-troops", "POST", "Set the army count of a territory"),
        ("/set-owner", "POST", "Set or clear the owner of a territory"),
        ("/reset", "POST", "Zero all armies, optionally clearing owners"),
        (
            "/new-board",
            "POST",
            "Start a new board from a config file or a random deal",
        ),
    ]
    .into_iter()
    .map(|(path, method, description)| ApiEndpoint {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    })
    .collect::<Vec<_>>();

    content::RawJson(serde_json::to_string_pretty(&endpoints).unwrap_or_default())
}

#[get("/board")]
async fn board(state: &State<SharedState>) -> Json<ApiResponse> {
    send_request_and_wait(state, Request::GetBoard).await
}

#[get("/territory/<name>")]
async fn territory(name: &str, state: &State<SharedState>) -> Json<ApiResponse> {
    send_request_and_wait(state, Request::GetTerritory(name.to_string())).await
}

#[get("/closest-enemy/<name>")]
async fn closest_enemy(name: &str, state: &State<SharedState>) -> Json<ApiResponse> {
    send_request_and_wait(state, Request::ClosestEnemy(name.to_string())).await
}

#[get("/connected/<from>/<to>")]
async fn connected(from: &str, to: &str, state: &State<SharedState>) -> Json<ApiResponse> {
    let request = Request::Connected {
        from: from.to_string(),
        to: to.to_string(),
    };
    send_request_and_wait(state, request).await
}

#[get("/fortify-targets/<name>")]
async fn fortify_targets(name: &str, state: &State<SharedState>) -> Json<ApiResponse> {
    send_request_and_wait(state, Request::FortifyTargets(name.to_string())).await
}

#[post("/set-troops", data = "<data>")]
async fn set_troops(data: Json<SetTroopsData>, state: &State<SharedState>) -> Json<ApiResponse> {
    send_request_and_wait(state, Request::SetTroops(data.into_inner())).await
}

#[post("/set-owner", data = "<data>")]
async fn set_owner(data: Json<SetOwnerData>, state: &State<SharedState>) -> Json<ApiResponse> {
    send_request_and_wait(state, Request::SetOwner(data.into_inner())).await
}

#[post("/reset", data = "<data>")]
async fn reset(data: Json<ResetData>, state: &State<SharedState>) -> Json<ApiResponse> {
    send_request_and_wait(state, Request::Reset(data.into_inner())).await
}

#[post("/new-board", data = "<data>")]
async fn new_board(data: Json<NewBoardData>, state: &State<SharedState>) -> Json<ApiResponse> {
    send_request_and_wait(state, Request::NewBoard(data.into_inner())).await
}

async fn send_request_and_wait(state: &State<SharedState>, request: Request) -> Json<ApiResponse> {
    let (response_sender, response_receiver) = oneshot::channel();
    let sent = state
        .sender
        .send(RequestWithResponse {
            request,
            response_sender,
        })
        .await;
    if sent.is_err() {
        return Json(ApiResponse::error("board worker has stopped".to_string()));
    }

    match response_receiver.await {
        Ok(response) => Json(response),
        Err(_) => Json(ApiResponse::error("board worker dropped the request".to_string())),
    }
}

async fn worker_task(mut receiver: mpsc::Receiver<RequestWithResponse>, session: Arc<Mutex<Session>>) {
    while let Some(RequestWithResponse {
        request,
        response_sender,
    }) = receiver.recv().await
    {
        let mut session = session.lock().await;
        let response = match session.handle(request) {
            Ok(value) => ApiResponse::success(value),
            Err(e) => {
                log::debug!("request failed: {}", e);
                ApiResponse::error(e.to_string())
            }
        };
        if response_sender.send(response).is_err() {
            log::warn!("client went away before the response was sent");
        }
    }
}

#[launch]
async fn rocket() -> _ {
    env_logger::init();

    let (sender, receiver) = mpsc::channel::<RequestWithResponse>(100);
    let session = Session::random(6, None).expect("Unable to build the classic board");
    let session = Arc::new(Mutex::new(session));

    tokio::spawn(worker_task(receiver, session.clone()));

    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .to_cors()
        .expect("Error creating CORS middleware");

    rocket::build()
        .manage(SharedState { sender })
        .mount(
            "/",
            routes![
                api_documentation,
                board,
                territory,
                closest_enemy,
                connected,
                fortify_targets,
                set_troops,
                set_owner,
                reset,
                new_board
            ],
        )
        .attach(cors)
}
