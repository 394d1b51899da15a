//! Govee smart-light client
//!
//! Devices are listed with [`list_devices`] and driven with a
//! [`ControlRequest`], a stateful PUT builder that holds exactly one command.
//! The service reports its own `code` and `message` in every body, separate
//! from the HTTP status.

use serde_json::{json, Value};

use http_client::{Method, Transport};

use crate::bounds::check_range;
use crate::credentials::ApiKey;
use crate::define_scaffold;
use crate::error::{ApiError, Result, ValidationError};
use crate::request::{GetRequest, PutRequest, Request, RequestDescriptor};
use crate::scaffold::ObjectScaffold;

pub const BASE_URL: &str = "https://developer-api.govee.com/v1";

const API_KEY_HEADER: &str = "Govee-API-Key";

/// Base URL and API key for one Govee account
#[derive(Debug, Clone)]
pub struct GoveeClient {
    base_url: String,
    key: ApiKey,
}

impl GoveeClient {
    pub fn new(key: ApiKey) -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            key,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn descriptor(&self, path: &str) -> RequestDescriptor {
        RequestDescriptor::new(format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, self.key.secret())
    }
}

define_scaffold! {
    /// One light or plug on the account
    pub struct GoveeDevice {
        /// MAC-style identifier, sent back as `device` in control calls
        device_id: str => "device",
        model: str => "model",
        device_name: str => "deviceName",
        is_controllable: bool => "controllable",
        is_retrievable: bool => "retrievable",
        supported_commands: strings => "supportCmds",
    }
}

impl GoveeDevice {
    pub fn supports(&self, command: &str) -> Result<bool> {
        Ok(self.supported_commands()?.contains(&command))
    }

    pub fn supports_turn(&self) -> Result<bool> {
        self.supports("turn")
    }

    pub fn supports_brightness(&self) -> Result<bool> {
        self.supports("brightness")
    }

    pub fn supports_color(&self) -> Result<bool> {
        self.supports("color")
    }

    pub fn supports_temperature(&self) -> Result<bool> {
        self.supports("colorTem")
    }

    /// Advertised colour temperature range in kelvin, when the device has one
    pub fn temperature_range(&self) -> Result<Option<(i64, i64)>> {
        if self.probe("properties.colorTem.range").is_none() {
            return Ok(None);
        }
        let min = self.get_int("properties.colorTem.range.min")?;
        let max = self.get_int("properties.colorTem.range.max")?;
        Ok(Some((min, max)))
    }
}

/// How many matches a finder returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    First,
    All,
}

/// Device attribute a finder compares against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceFilter<'a> {
    Id(&'a str),
    Model(&'a str),
    Name(&'a str),
    Controllable,
    Retrievable,
    SupportsCommand(&'a str),
}

impl DeviceFilter<'_> {
    fn matches(&self, device: &GoveeDevice) -> Result<bool> {
        match self {
            DeviceFilter::Id(id) => Ok(device.device_id()? == *id),
            DeviceFilter::Model(model) => Ok(device.model()? == *model),
            DeviceFilter::Name(name) => Ok(device.device_name()? == *name),
            DeviceFilter::Controllable => device.is_controllable(),
            DeviceFilter::Retrievable => device.is_retrievable(),
            DeviceFilter::SupportsCommand(command) => device.supports(command),
        }
    }
}

define_scaffold! {
    /// Body of the device listing
    pub struct DeviceList {
        code: int => "code",
        message: str => "message",
    }
}

impl DeviceList {
    pub fn devices(&self) -> Result<Vec<GoveeDevice>> {
        self.views("data.devices")
    }

    /// Devices matching `filter`; [`Match::First`] yields at most one
    pub fn find(&self, filter: DeviceFilter<'_>, mode: Match) -> Result<Vec<GoveeDevice>> {
        let mut found = Vec::new();
        for device in self.devices()? {
            if filter.matches(&device)? {
                found.push(device);
                if mode == Match::First {
                    break;
                }
            }
        }
        Ok(found)
    }

    pub fn find_first(&self, filter: DeviceFilter<'_>) -> Result<Option<GoveeDevice>> {
        Ok(self.find(filter, Match::First)?.into_iter().next())
    }

    pub fn by_id(&self, id: &str, mode: Match) -> Result<Vec<GoveeDevice>> {
        self.find(DeviceFilter::Id(id), mode)
    }

    pub fn by_model(&self, model: &str, mode: Match) -> Result<Vec<GoveeDevice>> {
        self.find(DeviceFilter::Model(model), mode)
    }

    pub fn by_name(&self, name: &str, mode: Match) -> Result<Vec<GoveeDevice>> {
        self.find(DeviceFilter::Name(name), mode)
    }

    pub fn controllable(&self, mode: Match) -> Result<Vec<GoveeDevice>> {
        self.find(DeviceFilter::Controllable, mode)
    }

    pub fn retrievable(&self, mode: Match) -> Result<Vec<GoveeDevice>> {
        self.find(DeviceFilter::Retrievable, mode)
    }

    pub fn supporting(&self, command: &str, mode: Match) -> Result<Vec<GoveeDevice>> {
        self.find(DeviceFilter::SupportsCommand(command), mode)
    }
}

/// List every device on the account
pub fn list_devices(client: &GoveeClient) -> GetRequest<DeviceList> {
    GetRequest::with_reshape(client.descriptor("/devices"), DeviceList::from_ref)
}

/// A single device command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoveeCommand {
    Turn(bool),
    Brightness(u8),
    Color { r: u8, g: u8, b: u8 },
    ColorTem(u32),
}

impl GoveeCommand {
    pub fn name(&self) -> &'static str {
        match self {
            GoveeCommand::Turn(_) => "turn",
            GoveeCommand::Brightness(_) => "brightness",
            GoveeCommand::Color { .. } => "color",
            GoveeCommand::ColorTem(_) => "colorTem",
        }
    }

    pub fn value(&self) -> Value {
        match *self {
            GoveeCommand::Turn(on) => json!(if on { "on" } else { "off" }),
            GoveeCommand::Brightness(level) => json!(level),
            GoveeCommand::Color { r, g, b } => json!({ "r": r, "g": g, "b": b }),
            GoveeCommand::ColorTem(kelvin) => json!(kelvin),
        }
    }

    fn to_json(self) -> Value {
        json!({ "name": self.name(), "value": self.value() })
    }
}

define_scaffold! {
    /// Service-level outcome reported in a control response body
    pub struct ControlReply {
        code: int => "code",
        message: str => "message",
    }
}

/// Stateful control call for one device
///
/// Each command setter replaces the previous command. Executing without a
/// command fails before any network call.
#[derive(Debug, Clone)]
pub struct ControlRequest {
    request: PutRequest,
    temperature_range: Option<(i64, i64)>,
    command: Option<GoveeCommand>,
}

impl ControlRequest {
    pub fn new(client: &GoveeClient, device: &GoveeDevice) -> Result<Self> {
        let descriptor = client
            .descriptor("/devices/control")
            .header("Content-Type", "application/json")
            .payload(json!({
                "device": device.device_id()?,
                "model": device.model()?,
            }));
        Ok(Self {
            request: PutRequest::new(descriptor),
            temperature_range: device.temperature_range()?,
            command: None,
        })
    }

    fn set_command(&mut self, command: GoveeCommand) -> &mut Self {
        self.request.set_payload_field("cmd", command.to_json());
        self.command = Some(command);
        self
    }

    pub fn turn_on(&mut self) -> &mut Self {
        self.set_command(GoveeCommand::Turn(true))
    }

    pub fn turn_off(&mut self) -> &mut Self {
        self.set_command(GoveeCommand::Turn(false))
    }

    /// Brightness in percent, 0 to 100
    pub fn set_brightness(&mut self, level: u8) -> Result<&mut Self> {
        check_range("brightness", level, 0, 100)?;
        Ok(self.set_command(GoveeCommand::Brightness(level)))
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8) -> &mut Self {
        self.set_command(GoveeCommand::Color { r, g, b })
    }

    /// Colour temperature in kelvin, checked against the device range when known
    pub fn set_temperature(&mut self, kelvin: u32) -> Result<&mut Self> {
        if let Some((min, max)) = self.temperature_range {
            check_range("colorTem", i64::from(kelvin), min, max)?;
        }
        Ok(self.set_command(GoveeCommand::ColorTem(kelvin)))
    }

    pub fn command(&self) -> Option<GoveeCommand> {
        self.command
    }

    pub fn payload(&self) -> Option<&Value> {
        self.request.payload()
    }

    /// The service's own code and message, once executed
    pub fn reply(&self) -> Option<Result<ControlReply>> {
        self.request
            .json()
            .map(|body| body.and_then(ControlReply::from_value))
    }
}

impl Request for ControlRequest {
    const METHOD: Method = Method::Put;

    fn descriptor(&self) -> &RequestDescriptor {
        self.request.descriptor()
    }

    fn code(&self) -> Option<u16> {
        self.request.code()
    }

    fn is_executed(&self) -> bool {
        self.request.is_executed()
    }

    fn execute<C: Transport + ?Sized>(&mut self, transport: &C) -> Result<u16> {
        if self.command.is_none() {
            return Err(ApiError::Validation(ValidationError::missing("cmd")));
        }
        self.request.execute(transport)
    }
}
