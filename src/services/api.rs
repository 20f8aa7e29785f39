//! Convenience API facade
//!
//! A fixed table of named operations, each mapped to a verb, a path, a body
//! encoding and an auth requirement. `ResQApi` methods delegate straight to
//! the request client: no retries, no validation, no transformation.

use serde::Serialize;
use serde_json::{json, Value};
use crate::services::request::{FormData, Method, RequestClient, RequestOptions, UiOptions};
use crate::models::Credentials;
use crate::utils::errors::Result;
use crate::utils::helpers::encode_segment;

/// How an operation's body is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    None,
    Json,
    Multipart,
}

/// Resolved route of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub encoding: Encoding,
    pub requires_auth: bool,
}

/// Admin listing collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminCollection {
    Ngos,
    Volunteers,
    Hospitals,
    PoliceStations,
    FireStations,
    BloodBanks,
    EmergencyContacts,
}

impl AdminCollection {
    pub const ALL: [AdminCollection; 7] = [
        AdminCollection::Ngos,
        AdminCollection::Volunteers,
        AdminCollection::Hospitals,
        AdminCollection::PoliceStations,
        AdminCollection::FireStations,
        AdminCollection::BloodBanks,
        AdminCollection::EmergencyContacts,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            AdminCollection::Ngos => "ngos",
            AdminCollection::Volunteers => "volunteers",
            AdminCollection::Hospitals => "hospitals",
            AdminCollection::PoliceStations => "police-stations",
            AdminCollection::FireStations => "fire-stations",
            AdminCollection::BloodBanks => "blood-banks",
            AdminCollection::EmergencyContacts => "emergency-contacts",
        }
    }
}

/// Every operation the facade exposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Login,
    Me,
    ReportCase,
    ListCases,
    RegisterNgo,
    RegisterVolunteer,
    ListHospitals,
    AddHospital,
    CreateDonation,
    ListDonations,
    UploadFile,
    ListUploadedFiles,
    AdminList(AdminCollection),
    ApproveNgo(i64),
    ApproveVolunteer(i64),
    AdminDeleteEntry { kind: String, id: i64 },
    AdminUploadCsv(String),
    ImportDataset(String),
    ExportDataset(String),
    GetUploadedCsvs,
    GetStatistics,
    GetLocationDistribution,
    ListEmergencyContacts,
    DeleteDataFile,
    ClearData(String),
    DeleteDataEntry { service_type: String, id: i64 },
}

impl Operation {
    /// Route of this operation
    pub fn endpoint(&self) -> Endpoint {
        use Encoding::{Json, Multipart, None as NoBody};

        let (method, path, encoding, requires_auth) = match self {
            Operation::Login => (Method::POST, "/auth/login".to_string(), Json, false),
            Operation::Me => (Method::GET, "/auth/me".to_string(), NoBody, true),
            Operation::ReportCase => (Method::POST, "/cases".to_string(), Multipart, false),
            Operation::ListCases => (Method::GET, "/cases".to_string(), NoBody, true),
            Operation::RegisterNgo => (Method::POST, "/registrations/ngo".to_string(), Json, false),
            Operation::RegisterVolunteer => (Method::POST, "/registrations/volunteer".to_string(), Json, false),
            Operation::ListHospitals => (Method::GET, "/hospitals".to_string(), NoBody, false),
            Operation::AddHospital => (Method::POST, "/hospitals".to_string(), Json, true),
            Operation::CreateDonation => (Method::POST, "/donations".to_string(), Json, false),
            Operation::ListDonations => (Method::GET, "/donations".to_string(), NoBody, false),
            Operation::UploadFile => (Method::POST, "/uploads".to_string(), Multipart, true),
            Operation::ListUploadedFiles => (Method::GET, "/uploads/files".to_string(), NoBody, false),
            Operation::AdminList(collection) => {
                (Method::GET, format!("/admin/{}", collection.slug()), NoBody, true)
            }
            Operation::ApproveNgo(id) => (Method::PATCH, format!("/admin/ngos/{}/approve", id), NoBody, true),
            Operation::ApproveVolunteer(id) => {
                (Method::PATCH, format!("/admin/volunteers/{}/approve", id), NoBody, true)
            }
            Operation::AdminDeleteEntry { kind, id } => {
                (Method::DELETE, format!("/admin/{}/{}", encode_segment(kind), id), NoBody, true)
            }
            Operation::AdminUploadCsv(service_type) => (
                Method::POST,
                format!("/admin/upload-csv/{}", encode_segment(service_type)),
                Multipart,
                true,
            ),
            Operation::ImportDataset(dataset_type) => (
                Method::POST,
                format!("/data/import/{}", encode_segment(dataset_type)),
                Multipart,
                true,
            ),
            Operation::ExportDataset(dataset_type) => (
                Method::GET,
                format!("/data/export/{}", encode_segment(dataset_type)),
                NoBody,
                false,
            ),
            Operation::GetUploadedCsvs => (Method::GET, "/data/files".to_string(), NoBody, false),
            Operation::GetStatistics => (Method::GET, "/data/stats".to_string(), NoBody, true),
            Operation::GetLocationDistribution => (Method::GET, "/data/locations".to_string(), NoBody, false),
            Operation::ListEmergencyContacts => {
                (Method::GET, "/data/emergency-contacts".to_string(), NoBody, false)
            }
            Operation::DeleteDataFile => (Method::DELETE, "/data/delete-file".to_string(), Json, true),
            Operation::ClearData(service_type) => (
                Method::DELETE,
                format!("/data/clear-data/{}", encode_segment(service_type)),
                NoBody,
                true,
            ),
            Operation::DeleteDataEntry { service_type, id } => (
                Method::DELETE,
                format!("/data/delete-entry/{}/{}", encode_segment(service_type), id),
                NoBody,
                true,
            ),
        };

        Endpoint {
            method,
            path,
            encoding,
            requires_auth,
        }
    }
}

/// Injectable facade over the request client
#[derive(Clone)]
pub struct ResQApi {
    client: RequestClient,
}

impl ResQApi {
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    async fn call(&self, operation: Operation, body: Option<Body>, token: Option<&str>, ui: UiOptions) -> Result<Value> {
        let endpoint = operation.endpoint();
        debug_assert!(
            endpoint.accepts(body.as_ref(), token),
            "{:?} called with a body or token that does not match its route",
            operation
        );
        let mut options = RequestOptions::new(endpoint.method).token(token);
        options = match body {
            Some(Body::Json(value)) => options.json(value),
            Some(Body::Form(form)) => options.form(form),
            None => options,
        };
        self.client.request(&endpoint.path, options, ui).await
    }

    async fn call_json<T: Serialize + ?Sized>(
        &self,
        operation: Operation,
        payload: &T,
        token: Option<&str>,
        ui: UiOptions,
    ) -> Result<Value> {
        let value = serde_json::to_value(payload)?;
        self.call(operation, Some(Body::Json(value)), token, ui).await
    }

    // AUTH

    pub async fn login(&self, credentials: &Credentials, ui: UiOptions) -> Result<Value> {
        self.call_json(Operation::Login, credentials, None, ui).await
    }

    pub async fn me(&self, token: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::Me, None, Some(token), ui).await
    }

    // CASES

    pub async fn report_case(&self, form: FormData, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ReportCase, Some(Body::Form(form)), None, ui).await
    }

    pub async fn list_cases(&self, token: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ListCases, None, Some(token), ui).await
    }

    // REGISTRATION

    pub async fn register_ngo<T: Serialize + ?Sized>(&self, payload: &T, ui: UiOptions) -> Result<Value> {
        self.call_json(Operation::RegisterNgo, payload, None, ui).await
    }

    pub async fn register_volunteer<T: Serialize + ?Sized>(&self, payload: &T, ui: UiOptions) -> Result<Value> {
        self.call_json(Operation::RegisterVolunteer, payload, None, ui).await
    }

    // HOSPITALS

    pub async fn list_hospitals(&self, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ListHospitals, None, None, ui).await
    }

    pub async fn add_hospital<T: Serialize + ?Sized>(&self, payload: &T, token: &str, ui: UiOptions) -> Result<Value> {
        self.call_json(Operation::AddHospital, payload, Some(token), ui).await
    }

    // DONATIONS

    pub async fn create_donation<T: Serialize + ?Sized>(&self, payload: &T, ui: UiOptions) -> Result<Value> {
        self.call_json(Operation::CreateDonation, payload, None, ui).await
    }

    pub async fn list_donations(&self, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ListDonations, None, None, ui).await
    }

    // UPLOADS

    pub async fn upload_file(&self, form: FormData, token: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::UploadFile, Some(Body::Form(form)), Some(token), ui).await
    }

    pub async fn list_uploaded_files(&self, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ListUploadedFiles, None, None, ui).await
    }

    // ADMIN

    pub async fn admin_list(&self, collection: AdminCollection, token: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::AdminList(collection), None, Some(token), ui).await
    }

    pub async fn approve_ngo(&self, id: i64, token: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ApproveNgo(id), None, Some(token), ui).await
    }

    pub async fn approve_volunteer(&self, id: i64, token: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ApproveVolunteer(id), None, Some(token), ui).await
    }

    pub async fn admin_delete_entry(&self, kind: &str, id: i64, token: &str, ui: UiOptions) -> Result<Value> {
        let operation = Operation::AdminDeleteEntry { kind: kind.to_string(), id };
        self.call(operation, None, Some(token), ui).await
    }

    pub async fn admin_upload_csv(&self, service_type: &str, form: FormData, token: &str, ui: UiOptions) -> Result<Value> {
        let operation = Operation::AdminUploadCsv(service_type.to_string());
        self.call(operation, Some(Body::Form(form)), Some(token), ui).await
    }

    // DATA

    pub async fn import_dataset(&self, dataset_type: &str, form: FormData, token: &str, ui: UiOptions) -> Result<Value> {
        let operation = Operation::ImportDataset(dataset_type.to_string());
        self.call(operation, Some(Body::Form(form)), Some(token), ui).await
    }

    pub async fn export_dataset(&self, dataset_type: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ExportDataset(dataset_type.to_string()), None, None, ui).await
    }

    pub async fn get_uploaded_csvs(&self, ui: UiOptions) -> Result<Value> {
        self.call(Operation::GetUploadedCsvs, None, None, ui).await
    }

    pub async fn get_statistics(&self, token: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::GetStatistics, None, Some(token), ui).await
    }

    pub async fn get_location_distribution(&self, ui: UiOptions) -> Result<Value> {
        self.call(Operation::GetLocationDistribution, None, None, ui).await
    }

    pub async fn list_emergency_contacts(&self, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ListEmergencyContacts, None, None, ui).await
    }

    pub async fn delete_data_file(&self, filename: &str, token: &str, ui: UiOptions) -> Result<Value> {
        let body = json!({ "filename": filename });
        self.call(Operation::DeleteDataFile, Some(Body::Json(body)), Some(token), ui).await
    }

    pub async fn clear_data(&self, service_type: &str, token: &str, ui: UiOptions) -> Result<Value> {
        self.call(Operation::ClearData(service_type.to_string()), None, Some(token), ui).await
    }

    pub async fn delete_data_entry(&self, service_type: &str, id: i64, token: &str, ui: UiOptions) -> Result<Value> {
        let operation = Operation::DeleteDataEntry { service_type: service_type.to_string(), id };
        self.call(operation, None, Some(token), ui).await
    }
}

enum Body {
    Json(Value),
    Form(FormData),
}

impl Endpoint {
    /// Whether a call's body kind and token fit this route
    fn accepts(&self, body: Option<&Body>, token: Option<&str>) -> bool {
        let encoding_matches = matches!(
            (self.encoding, body),
            (Encoding::None, None) | (Encoding::Json, Some(Body::Json(_))) | (Encoding::Multipart, Some(Body::Form(_)))
        );
        encoding_matches && (!self.requires_auth || token.is_some())
    }
}
