use crate::content::locale::Language;
use crate::content::settings::{Settings, SettingsRequest, Theme};
use crate::engine::systems::scroll::{PageRoot, PageScroll, ScrollToSection};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use constants::layout::SECTION_IDS;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications queued this frame and not yet posted.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the postMessage bridge to the embedding page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Shared between the JS callback and the ECS.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // The listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

/// State the request handlers read or write.
#[derive(SystemParam)]
pub struct RpcContext<'w, 's> {
    settings: Res<'w, Settings>,
    scroll: Res<'w, PageScroll>,
    pages: Query<'w, 's, (), With<PageRoot>>,
    settings_requests: EventWriter<'w, SettingsRequest>,
    scroll_requests: EventWriter<'w, ScrollToSection>,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut context: RpcContext,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "set_language" => handle_set_language(&request.params, context),
        "set_theme" => handle_set_theme(&request.params, context),
        "get_settings" => Ok(handle_get_settings(context)),
        "scroll_to_section" => handle_scroll_to_section(&request.params, context),
        "get_active_section" => Ok(serde_json::json!({
            "section": context.scroll.active_section
        })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    // Notifications carry no ID and get no response.
    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_set_language(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct LanguageParams {
        language: String,
    }

    let parsed = serde_json::from_value::<LanguageParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'language' parameter"))?;
    let language = parsed
        .language
        .parse::<Language>()
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;

    context
        .settings_requests
        .write(SettingsRequest::SetLanguage(language));
    info!("Language change requested over RPC: {}", language.code());

    Ok(serde_json::json!({
        "success": true,
        "language": language.code()
    }))
}

fn handle_set_theme(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ThemeParams {
        theme: String,
    }

    let parsed = serde_json::from_value::<ThemeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'theme' parameter"))?;
    let request = if parsed.theme == "toggle" {
        SettingsRequest::ToggleTheme
    } else {
        let theme = parsed
            .theme
            .parse::<Theme>()
            .map_err(|e| RpcError::invalid_params(&e.to_string()))?;
        SettingsRequest::SetTheme(theme)
    };

    context.settings_requests.write(request);

    Ok(serde_json::json!({
        "success": true,
        "theme": parsed.theme
    }))
}

fn handle_get_settings(context: &RpcContext) -> serde_json::Value {
    serde_json::json!({
        "theme": context.settings.theme().as_str(),
        "language": context.settings.language().code()
    })
}

fn handle_scroll_to_section(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SectionParams {
        section: String,
    }

    let parsed = serde_json::from_value::<SectionParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'section' parameter"))?;
    if !SECTION_IDS.contains(&parsed.section.as_str()) {
        return Err(RpcError::invalid_params(&format!(
            "Unknown section: {}",
            parsed.section
        )));
    }
    if context.pages.is_empty() {
        return Err(RpcError::internal_error("Portfolio page is not built yet"));
    }

    context
        .scroll_requests
        .write(ScrollToSection(parsed.section.clone()));

    Ok(serde_json::json!({
        "success": true,
        "section": parsed.section
    }))
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications first, responses second.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::settings::MemoryStore;

    fn rpc_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(Settings::load(Box::new(MemoryStore::default()), None))
            .insert_resource(PageScroll {
                active_section: Some("projects"),
                ..default()
            })
            .init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<SettingsRequest>()
            .add_event::<ScrollToSection>()
            .add_systems(Update, handle_rpc_messages);
        app
    }

    fn call(app: &mut App, message: serde_json::Value) -> Vec<RpcResponse> {
        app.world_mut().send_event(IncomingRpcMessage {
            content: message.to_string(),
        });
        app.update();
        std::mem::take(
            &mut app
                .world_mut()
                .resource_mut::<WebRpcInterface>()
                .outgoing_responses,
        )
    }

    #[test]
    fn set_language_validates_and_forwards() {
        let mut app = rpc_app();
        let responses = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0", "method": "set_language",
                "params": { "language": "fr" }, "id": 1
            }),
        );
        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0].result.as_ref().and_then(|r| r.get("language")),
            Some(&serde_json::json!("fr"))
        );
        let requests = app.world().resource::<Events<SettingsRequest>>();
        let forwarded: Vec<_> = requests.get_cursor().read(requests).copied().collect();
        assert_eq!(forwarded, vec![SettingsRequest::SetLanguage(Language::Fr)]);

        let rejected = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0", "method": "set_language",
                "params": { "language": "de" }, "id": 2
            }),
        );
        assert_eq!(rejected[0].error.as_ref().map(|e| e.code), Some(-32602));
    }

    #[test]
    fn unknown_methods_and_sections_are_rejected() {
        let mut app = rpc_app();
        let unknown = call(
            &mut app,
            serde_json::json!({ "jsonrpc": "2.0", "method": "get_fps", "id": 7 }),
        );
        assert_eq!(unknown[0].error.as_ref().map(|e| e.code), Some(-32601));

        let bad_section = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0", "method": "scroll_to_section",
                "params": { "section": "blog" }, "id": 8
            }),
        );
        assert_eq!(bad_section[0].error.as_ref().map(|e| e.code), Some(-32602));

        let too_early = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0", "method": "scroll_to_section",
                "params": { "section": "contact" }, "id": 9
            }),
        );
        assert_eq!(too_early[0].error.as_ref().map(|e| e.code), Some(-32603));

        app.world_mut().spawn(PageRoot);
        let scrolled = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0", "method": "scroll_to_section",
                "params": { "section": "contact" }, "id": 10
            }),
        );
        assert!(scrolled[0].error.is_none());
    }

    #[test]
    fn queries_report_current_state() {
        let mut app = rpc_app();
        let settings = call(
            &mut app,
            serde_json::json!({ "jsonrpc": "2.0", "method": "get_settings", "id": "a" }),
        );
        assert_eq!(
            settings[0].result,
            Some(serde_json::json!({ "theme": "dark", "language": "en" }))
        );

        let active = call(
            &mut app,
            serde_json::json!({ "jsonrpc": "2.0", "method": "get_active_section", "id": "b" }),
        );
        assert_eq!(
            active[0].result,
            Some(serde_json::json!({ "section": "projects" }))
        );
    }

    #[test]
    fn notifications_without_id_get_no_response() {
        let mut app = rpc_app();
        let responses = call(
            &mut app,
            serde_json::json!({
                "jsonrpc": "2.0", "method": "set_theme", "params": { "theme": "light" }
            }),
        );
        assert!(responses.is_empty());
        let requests = app.world().resource::<Events<SettingsRequest>>();
        assert_eq!(requests.get_cursor().read(requests).count(), 1);
    }
}
