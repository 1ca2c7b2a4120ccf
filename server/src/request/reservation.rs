use application::transfer::{
    CancelReservationDto, CreatePendingReservationDto, CreateReservationDto, GenerateContractDto,
    GetContractDto, GetContractsDto, GetReservationDto, GetReservationsDto, HandoverDto,
    RescheduleReservationDto, ReturnDto,
};
use kernel::prelude::entity::ReservationStatus;
use serde::Deserialize;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    vehicle_id: Uuid,
    customer_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePendingReservationRequest {
    vehicle_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetReservationsRequest {
    vehicle_id: Option<Uuid>,
    status: Option<ReservationStatus>,
}

#[derive(Debug)]
pub struct GetReservationRequest {
    id: Uuid,
}

impl GetReservationRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
}

#[derive(Debug)]
pub struct CancelRequest {
    id: Uuid,
}

impl CancelRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct HandoverRequest {
    start_mileage: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    end_mileage: Option<i64>,
}

#[derive(Debug)]
pub struct ReservationContractsRequest {
    reservation_id: Uuid,
}

impl ReservationContractsRequest {
    pub fn new(reservation_id: Uuid) -> Self {
        Self { reservation_id }
    }
}

#[derive(Debug)]
pub struct GenerateContractRequest {
    reservation_id: Uuid,
}

impl GenerateContractRequest {
    pub fn new(reservation_id: Uuid) -> Self {
        Self { reservation_id }
    }
}

#[derive(Debug)]
pub struct GetContractRequest {
    id: Uuid,
}

impl GetContractRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct ReservationTransformer;

impl Intake<CreateReservationRequest> for ReservationTransformer {
    type To = CreateReservationDto;
    fn emit(&self, input: CreateReservationRequest) -> Self::To {
        CreateReservationDto {
            vehicle_id: input.vehicle_id,
            customer_id: input.customer_id,
            start: input.start,
            end: input.end,
            notes: input.notes,
        }
    }
}

impl Intake<(CreatePendingReservationRequest, Duration)> for ReservationTransformer {
    type To = CreatePendingReservationDto;
    fn emit(&self, input: (CreatePendingReservationRequest, Duration)) -> Self::To {
        let (input, token_ttl) = input;
        CreatePendingReservationDto {
            vehicle_id: input.vehicle_id,
            start: input.start,
            end: input.end,
            notes: input.notes,
            token_ttl,
        }
    }
}

impl Intake<GetReservationsRequest> for ReservationTransformer {
    type To = GetReservationsDto;
    fn emit(&self, input: GetReservationsRequest) -> Self::To {
        GetReservationsDto {
            vehicle_id: input.vehicle_id,
            status: input.status,
        }
    }
}

impl Intake<GetReservationRequest> for ReservationTransformer {
    type To = GetReservationDto;
    fn emit(&self, input: GetReservationRequest) -> Self::To {
        GetReservationDto { id: input.id }
    }
}

impl Intake<(Uuid, RescheduleRequest)> for ReservationTransformer {
    type To = RescheduleReservationDto;
    fn emit(&self, input: (Uuid, RescheduleRequest)) -> Self::To {
        let (id, input) = input;
        RescheduleReservationDto {
            id,
            start: input.start,
            end: input.end,
        }
    }
}

impl Intake<CancelRequest> for ReservationTransformer {
    type To = CancelReservationDto;
    fn emit(&self, input: CancelRequest) -> Self::To {
        CancelReservationDto { id: input.id }
    }
}

impl Intake<(Uuid, HandoverRequest)> for ReservationTransformer {
    type To = HandoverDto;
    fn emit(&self, input: (Uuid, HandoverRequest)) -> Self::To {
        let (reservation_id, input) = input;
        HandoverDto {
            reservation_id,
            start_mileage: input.start_mileage,
        }
    }
}

impl Intake<(Uuid, ReturnRequest)> for ReservationTransformer {
    type To = ReturnDto;
    fn emit(&self, input: (Uuid, ReturnRequest)) -> Self::To {
        let (reservation_id, input) = input;
        ReturnDto {
            reservation_id,
            end_mileage: input.end_mileage,
        }
    }
}

pub struct ContractTransformer;

impl Intake<ReservationContractsRequest> for ContractTransformer {
    type To = GetContractsDto;
    fn emit(&self, input: ReservationContractsRequest) -> Self::To {
        GetContractsDto {
            reservation_id: Some(input.reservation_id),
        }
    }
}

impl Intake<GenerateContractRequest> for ContractTransformer {
    type To = GenerateContractDto;
    fn emit(&self, input: GenerateContractRequest) -> Self::To {
        GenerateContractDto {
            reservation_id: input.reservation_id,
        }
    }
}

impl Intake<GetContractRequest> for ContractTransformer {
    type To = GetContractDto;
    fn emit(&self, input: GetContractRequest) -> Self::To {
        GetContractDto { id: input.id }
    }
}
