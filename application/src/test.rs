use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use driver::database::{
    InMemoryContractRepository, InMemoryCustomerRepository, InMemoryDatabase,
    InMemoryLedgerRepository, InMemoryNotificationRepository, InMemoryReservationRepository,
    InMemoryTransaction, InMemoryVehicleRepository,
};
use driver::generator::TemplateContractGenerator;
use kernel::interface::database::DatabaseConnection;
use kernel::interface::event::ReservationEvent;
use kernel::interface::generator::DependOnContractGenerator;
use kernel::interface::query::{
    DependOnContractQuery, DependOnCustomerQuery, DependOnLedgerQuery, DependOnNotificationQuery,
    DependOnReservationQuery, DependOnVehicleQuery,
};
use kernel::interface::update::{
    DependOnContractModifier, DependOnCustomerModifier, DependOnLedgerModifier,
    DependOnNotificationModifier, DependOnReservationModifier, DependOnVehicleModifier,
};
use kernel::prelude::entity::{ExpenseCategory, ReservationStatus, TransactionKind, VehicleStatus};
use kernel::KernelError;

use crate::service::{
    AvailabilityService, CreateCustomerService, CreateReservationService, CreateVehicleService,
    GenerateContractService, GetContractService, GetLedgerService, GetNotificationService,
    GetReservationService, GetVehicleService, HandoverService, PortalService,
    ReadNotificationService, RecordLedgerService, ReportService, ReturnAlertService,
    ReturnService, UpdateReservationService, UpdateVehicleService,
};
use crate::transfer::{
    CancelReservationDto, CheckAvailabilityDto, CreateCustomerDto, CreatePendingReservationDto,
    CreateQuoteDto, CreateReservationDto, CreateVehicleDto, DashboardReportDto,
    GenerateContractDto, GetContractsDto, GetLedgerDto, GetNotificationsDto, GetReservationDto,
    GetReservationsDto, GetVehicleDto, HandoverDto, LookupPortalDto, MarkNotificationReadDto,
    RecordExpenseDto, RecordIncomeDto, RescheduleReservationDto, ReturnDto, ScanReturnAlertsDto,
    SetMaintenanceDto, SubmitPortalDto, TopCustomersReportDto, UtilizationReportDto,
};

#[derive(Clone, Default)]
struct TestModule {
    database: InMemoryDatabase,
    generator: TemplateContractGenerator,
}

#[async_trait::async_trait]
impl DatabaseConnection for TestModule {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        self.database.transact().await
    }
}

impl DependOnVehicleQuery for TestModule {
    type VehicleQuery = InMemoryVehicleRepository;
    fn vehicle_query(&self) -> &Self::VehicleQuery {
        &InMemoryVehicleRepository
    }
}

impl DependOnVehicleModifier for TestModule {
    type VehicleModifier = InMemoryVehicleRepository;
    fn vehicle_modifier(&self) -> &Self::VehicleModifier {
        &InMemoryVehicleRepository
    }
}

impl DependOnCustomerQuery for TestModule {
    type CustomerQuery = InMemoryCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &InMemoryCustomerRepository
    }
}

impl DependOnCustomerModifier for TestModule {
    type CustomerModifier = InMemoryCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &InMemoryCustomerRepository
    }
}

impl DependOnReservationQuery for TestModule {
    type ReservationQuery = InMemoryReservationRepository;
    fn reservation_query(&self) -> &Self::ReservationQuery {
        &InMemoryReservationRepository
    }
}

impl DependOnReservationModifier for TestModule {
    type ReservationModifier = InMemoryReservationRepository;
    fn reservation_modifier(&self) -> &Self::ReservationModifier {
        &InMemoryReservationRepository
    }
}

impl DependOnLedgerQuery for TestModule {
    type LedgerQuery = InMemoryLedgerRepository;
    fn ledger_query(&self) -> &Self::LedgerQuery {
        &InMemoryLedgerRepository
    }
}

impl DependOnLedgerModifier for TestModule {
    type LedgerModifier = InMemoryLedgerRepository;
    fn ledger_modifier(&self) -> &Self::LedgerModifier {
        &InMemoryLedgerRepository
    }
}

impl DependOnContractQuery for TestModule {
    type ContractQuery = InMemoryContractRepository;
    fn contract_query(&self) -> &Self::ContractQuery {
        &InMemoryContractRepository
    }
}

impl DependOnContractModifier for TestModule {
    type ContractModifier = InMemoryContractRepository;
    fn contract_modifier(&self) -> &Self::ContractModifier {
        &InMemoryContractRepository
    }
}

impl DependOnNotificationQuery for TestModule {
    type NotificationQuery = InMemoryNotificationRepository;
    fn notification_query(&self) -> &Self::NotificationQuery {
        &InMemoryNotificationRepository
    }
}

impl DependOnNotificationModifier for TestModule {
    type NotificationModifier = InMemoryNotificationRepository;
    fn notification_modifier(&self) -> &Self::NotificationModifier {
        &InMemoryNotificationRepository
    }
}

impl DependOnContractGenerator for TestModule {
    type ContractGenerator = TemplateContractGenerator;
    fn contract_generator(&self) -> &Self::ContractGenerator {
        &self.generator
    }
}

async fn vehicle(module: &TestModule, plate: &str) -> Uuid {
    module
        .create_vehicle(CreateVehicleDto {
            name: format!("Skoda Octavia {plate}"),
            license_plate: plate.to_string(),
            rate_4h: 500,
            rate_12h: 900,
            daily_rate: 1200,
            current_mileage: 1000,
        })
        .await
        .unwrap()
        .id
}

async fn customer(module: &TestModule, first_name: &str) -> Uuid {
    module
        .create_customer(CreateCustomerDto {
            first_name: first_name.to_string(),
            last_name: "Novak".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: "+420 777 000 111".to_string(),
            address: "Brno".to_string(),
            license_number: "CZ123456".to_string(),
            license_image_url: None,
        })
        .await
        .unwrap()
        .id
}

async fn book(
    module: &TestModule,
    vehicle_id: Uuid,
    customer_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> error_stack::Result<Uuid, KernelError> {
    module
        .create_reservation(CreateReservationDto {
            vehicle_id,
            customer_id,
            start,
            end,
            notes: None,
        })
        .await
        .map(|reservation| reservation.id)
}

fn portal_form(token: &str) -> SubmitPortalDto {
    SubmitPortalDto {
        token: token.to_string(),
        first_name: "Eva".to_string(),
        last_name: "Dvorak".to_string(),
        email: "eva@example.com".to_string(),
        phone: "+420 777 222 333".to_string(),
        address: "Praha".to_string(),
        license_number: "CZ654321".to_string(),
        license_image_url: Some("https://cdn.example.com/license.png".to_string()),
    }
}

#[tokio::test]
async fn overlapping_booking_is_rejected() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "1AB 2345").await;
    let customer_id = customer(&module, "Jan").await;

    book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-03 08:00 UTC),
    )
    .await
    .unwrap();

    let report = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-02 08:00 UTC),
        datetime!(2024-05-04 08:00 UTC),
    )
    .await
    .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::Conflict));

    // touching intervals do not overlap
    book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-03 08:00 UTC),
        datetime!(2024-05-04 08:00 UTC),
    )
    .await
    .unwrap();

    let available = module
        .check_availability(CheckAvailabilityDto {
            vehicle_id,
            start: datetime!(2024-05-02 12:00 UTC),
            end: datetime!(2024-05-02 14:00 UTC),
            excluding_reservation_id: None,
        })
        .await
        .unwrap();
    assert!(!available);
}

#[tokio::test]
async fn scheduled_booking_stamps_price_and_issues_contract() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "2AB 2345").await;
    let customer_id = customer(&module, "Jan").await;

    let quote = module
        .quote(CreateQuoteDto {
            vehicle_id,
            start: datetime!(2024-05-01 08:00 UTC),
            end: datetime!(2024-05-02 09:00 UTC),
        })
        .await
        .unwrap();
    assert_eq!(quote.price, 2400);

    let id = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-02 09:00 UTC),
    )
    .await
    .unwrap();
    let reservation = module
        .get_reservation(GetReservationDto { id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Scheduled);
    assert_eq!(reservation.total_price, 2400);
    assert_eq!(reservation.customer_name.as_deref(), Some("Jan Novak"));

    let contracts = module
        .get_contracts(GetContractsDto {
            reservation_id: Some(id),
        })
        .await
        .unwrap();
    assert_eq!(contracts.len(), 1);
    assert!(contracts[0].text.contains("Jan Novak"));

    module
        .generate_contract(GenerateContractDto { reservation_id: id })
        .await
        .unwrap();
    let contracts = module
        .get_contracts(GetContractsDto {
            reservation_id: Some(id),
        })
        .await
        .unwrap();
    assert_eq!(contracts.len(), 2);
}

#[tokio::test]
async fn cancelling_frees_the_interval() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "3AB 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let start = datetime!(2024-05-01 08:00 UTC);
    let end = datetime!(2024-05-03 08:00 UTC);

    let id = book(&module, vehicle_id, customer_id, start, end)
        .await
        .unwrap();
    let cancelled = module
        .cancel_reservation(CancelReservationDto { id })
        .await
        .unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    book(&module, vehicle_id, customer_id, start, end)
        .await
        .unwrap();

    let report = module
        .cancel_reservation(CancelReservationDto { id })
        .await
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        KernelError::InvalidTransition
    ));

    let ledger = module.get_ledger(GetLedgerDto::default()).await.unwrap();
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn rental_round_trip_books_one_income_entry() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "4AB 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let id = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-03 08:00 UTC),
    )
    .await
    .unwrap();

    let active = module
        .hand_over(HandoverDto {
            reservation_id: id,
            start_mileage: Some(1000),
        })
        .await
        .unwrap();
    assert_eq!(active.status, ReservationStatus::Active);
    let rented = module
        .get_vehicle(GetVehicleDto { id: vehicle_id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rented.status, VehicleStatus::Rented);

    let receipt = module
        .return_vehicle(ReturnDto {
            reservation_id: id,
            end_mileage: Some(1900),
        })
        .await
        .unwrap();
    assert_eq!(receipt.rental_days, 2);
    assert_eq!(receipt.allowed_mileage, 600);
    assert_eq!(receipt.overage_mileage, 300);
    assert_eq!(receipt.overage_fee, 900);
    assert_eq!(receipt.amount, 2400 + 900);

    let returned = module
        .get_vehicle(GetVehicleDto { id: vehicle_id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(returned.status, VehicleStatus::Available);
    assert_eq!(returned.current_mileage, 1900);

    let reservation = module
        .get_reservation(GetReservationDto { id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Completed);
    assert_eq!(reservation.total_price, 2400);

    let income = module
        .get_ledger(GetLedgerDto {
            reservation_id: Some(id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].kind, TransactionKind::Income);
    assert_eq!(income[0].amount, 3300);
    assert_eq!(income[0].id, receipt.income_id);

    let events = module
        .get_notifications(GetNotificationsDto::default())
        .await
        .unwrap()
        .into_iter()
        .map(|notification| notification.event.name())
        .collect::<Vec<_>>();
    assert!(events.contains(&"created"));
    assert!(events.contains(&"handed_over"));
    assert!(events.contains(&"returned"));

    let report = module
        .cancel_reservation(CancelReservationDto { id })
        .await
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        KernelError::InvalidTransition
    ));
}

#[tokio::test]
async fn rejected_transitions_leave_state_untouched() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "5AB 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let id = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-03 08:00 UTC),
    )
    .await
    .unwrap();

    let report = module
        .return_vehicle(ReturnDto {
            reservation_id: id,
            end_mileage: Some(1200),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        KernelError::InvalidTransition
    ));

    let report = module
        .hand_over(HandoverDto {
            reservation_id: id,
            start_mileage: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::InvalidMileage));

    module
        .hand_over(HandoverDto {
            reservation_id: id,
            start_mileage: Some(1000),
        })
        .await
        .unwrap();

    let report = module
        .return_vehicle(ReturnDto {
            reservation_id: id,
            end_mileage: Some(900),
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::InvalidMileage));

    let reservation = module
        .get_reservation(GetReservationDto { id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Active);
    assert_eq!(reservation.end_mileage, None);
    let rented = module
        .get_vehicle(GetVehicleDto { id: vehicle_id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rented.status, VehicleStatus::Rented);
    let ledger = module.get_ledger(GetLedgerDto::default()).await.unwrap();
    assert!(ledger.is_empty());

    let report = module
        .reschedule_reservation(RescheduleReservationDto {
            id,
            start: datetime!(2024-06-01 08:00 UTC),
            end: datetime!(2024-06-03 08:00 UTC),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        KernelError::InvalidTransition
    ));
}

#[tokio::test]
async fn vehicle_in_maintenance_cannot_be_handed_over() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "6AB 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let id = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-03 08:00 UTC),
    )
    .await
    .unwrap();
    module
        .set_maintenance(SetMaintenanceDto {
            id: vehicle_id,
            maintenance: true,
        })
        .await
        .unwrap();

    let report = module
        .hand_over(HandoverDto {
            reservation_id: id,
            start_mileage: Some(1000),
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::Conflict));

    let reservation = module
        .get_reservation(GetReservationDto { id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Scheduled);
}

#[tokio::test]
async fn reschedule_restamps_price_and_checks_overlap() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "7AB 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let first = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-03 08:00 UTC),
    )
    .await
    .unwrap();
    book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-10 08:00 UTC),
        datetime!(2024-05-12 08:00 UTC),
    )
    .await
    .unwrap();

    let moved = module
        .reschedule_reservation(RescheduleReservationDto {
            id: first,
            start: datetime!(2024-05-02 08:00 UTC),
            end: datetime!(2024-05-02 11:00 UTC),
        })
        .await
        .unwrap();
    assert_eq!(moved.total_price, 500);

    let report = module
        .reschedule_reservation(RescheduleReservationDto {
            id: first,
            start: datetime!(2024-05-09 08:00 UTC),
            end: datetime!(2024-05-11 08:00 UTC),
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::Conflict));

    let unchanged = module
        .get_reservation(GetReservationDto { id: first })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.start, datetime!(2024-05-02 08:00 UTC));
}

#[tokio::test]
async fn portal_binds_customer_once() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "8AB 2345").await;

    let pending = module
        .create_pending_reservation(CreatePendingReservationDto {
            vehicle_id,
            start: datetime!(2024-05-01 08:00 UTC),
            end: datetime!(2024-05-03 08:00 UTC),
            notes: Some("airport pickup".to_string()),
            token_ttl: Duration::hours(72),
        })
        .await
        .unwrap();
    assert_eq!(
        pending.reservation.status,
        ReservationStatus::PendingCustomer
    );
    assert_eq!(pending.reservation.customer_id, None);

    let view = module
        .lookup_portal(LookupPortalDto {
            token: pending.portal_token.clone(),
        })
        .await
        .unwrap();
    assert_eq!(view.reservation_id, pending.reservation.id);
    assert_eq!(view.license_plate, "8AB 2345");

    let report = module
        .lookup_portal(LookupPortalDto {
            token: "unknown".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::InvalidToken));

    let bound = module
        .submit_portal(portal_form(&pending.portal_token))
        .await
        .unwrap();
    assert_eq!(bound.status, ReservationStatus::Scheduled);
    assert_eq!(bound.customer_name.as_deref(), Some("Eva Dvorak"));

    let report = module
        .submit_portal(portal_form(&pending.portal_token))
        .await
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        KernelError::AlreadyCompleted
    ));

    let contracts = module
        .get_contracts(GetContractsDto {
            reservation_id: Some(bound.id),
        })
        .await
        .unwrap();
    assert_eq!(contracts.len(), 1);
}

#[tokio::test]
async fn portal_binding_rechecks_the_interval() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "9AB 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let start = datetime!(2024-05-01 08:00 UTC);
    let end = datetime!(2024-05-03 08:00 UTC);

    let pending = module
        .create_pending_reservation(CreatePendingReservationDto {
            vehicle_id,
            start,
            end,
            notes: None,
            token_ttl: Duration::hours(72),
        })
        .await
        .unwrap();
    // a pending booking does not hold the vehicle
    book(&module, vehicle_id, customer_id, start, end)
        .await
        .unwrap();

    let report = module
        .submit_portal(portal_form(&pending.portal_token))
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::Conflict));

    let still_pending = module
        .get_reservation(GetReservationDto {
            id: pending.reservation.id,
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still_pending.status, ReservationStatus::PendingCustomer);
}

#[tokio::test]
async fn expired_portal_link_is_rejected() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "1CD 2345").await;
    let pending = module
        .create_pending_reservation(CreatePendingReservationDto {
            vehicle_id,
            start: datetime!(2024-05-01 08:00 UTC),
            end: datetime!(2024-05-03 08:00 UTC),
            notes: None,
            token_ttl: Duration::ZERO,
        })
        .await
        .unwrap();

    let report = module
        .submit_portal(portal_form(&pending.portal_token))
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::InvalidToken));
}

#[tokio::test]
async fn return_alert_is_raised_once() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "2CD 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let now = OffsetDateTime::now_utc();
    let soon = book(
        &module,
        vehicle_id,
        customer_id,
        now - Duration::days(1),
        now + Duration::minutes(30),
    )
    .await
    .unwrap();
    let other_vehicle = vehicle(&module, "3CD 2345").await;
    let later = book(
        &module,
        other_vehicle,
        customer_id,
        now - Duration::days(1),
        now + Duration::days(2),
    )
    .await
    .unwrap();
    for id in [soon, later] {
        module
            .hand_over(HandoverDto {
                reservation_id: id,
                start_mileage: Some(1000),
            })
            .await
            .unwrap();
    }

    let scan = || ScanReturnAlertsDto {
        now,
        lookahead: Duration::minutes(60),
    };
    let flagged = module.scan_return_alerts(scan()).await.unwrap();
    assert_eq!(flagged, vec![soon]);
    let flagged = module.scan_return_alerts(scan()).await.unwrap();
    assert!(flagged.is_empty());

    let alerts = module
        .get_notifications(GetNotificationsDto {
            unread_only: true,
            since: None,
        })
        .await
        .unwrap()
        .into_iter()
        .filter(|notification| notification.event.is_return_due_soon())
        .collect::<Vec<_>>();
    assert_eq!(alerts.len(), 1);
    assert!(matches!(
        alerts[0].event,
        ReservationEvent::ReturnDueSoon { .. }
    ));
}

#[tokio::test]
async fn notifications_can_be_marked_read() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "4CD 2345").await;
    let customer_id = customer(&module, "Jan").await;
    for day in 1..=3 {
        book(
            &module,
            vehicle_id,
            customer_id,
            datetime!(2024-05-01 08:00 UTC) + Duration::days(day * 2),
            datetime!(2024-05-02 08:00 UTC) + Duration::days(day * 2),
        )
        .await
        .unwrap();
    }

    let unread = module
        .get_notifications(GetNotificationsDto {
            unread_only: true,
            since: None,
        })
        .await
        .unwrap();
    assert_eq!(unread.len(), 3);

    let read = module
        .mark_notification_read(MarkNotificationReadDto { id: unread[0].id })
        .await
        .unwrap();
    assert!(read.is_read);
    assert_eq!(module.mark_all_notifications_read().await.unwrap(), 2);
    assert_eq!(module.mark_all_notifications_read().await.unwrap(), 0);
}

#[tokio::test]
async fn ledger_summary_balances_income_and_expense() {
    let module = TestModule::default();
    module
        .record_expense(RecordExpenseDto {
            amount: 700,
            date: Some(datetime!(2024-05-01 10:00 UTC)),
            description: "Oil change".to_string(),
            category: ExpenseCategory::Service,
        })
        .await
        .unwrap();
    module
        .record_expense(RecordExpenseDto {
            amount: 300,
            date: Some(datetime!(2024-05-02 10:00 UTC)),
            description: "Fuel".to_string(),
            category: ExpenseCategory::Fuel,
        })
        .await
        .unwrap();
    module
        .record_income(RecordIncomeDto {
            amount: 2500,
            date: Some(datetime!(2024-05-03 10:00 UTC)),
            description: "Corporate deal".to_string(),
            reservation_id: None,
        })
        .await
        .unwrap();

    let report = module
        .record_expense(RecordExpenseDto {
            amount: -1,
            date: None,
            description: "Refund".to_string(),
            category: ExpenseCategory::Other,
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::InvalidAmount));
    let report = module
        .record_income(RecordIncomeDto {
            amount: 100,
            date: None,
            description: "Damage".to_string(),
            reservation_id: Some(Uuid::new_v4()),
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::NotFound));

    let summary = module
        .get_ledger_summary(GetLedgerDto::default())
        .await
        .unwrap();
    assert_eq!(summary.total_income, 2500);
    assert_eq!(summary.total_expense, 1000);
    assert_eq!(summary.balance, 1500);

    let may_second = module
        .get_ledger(GetLedgerDto {
            kind: Some(TransactionKind::Expense),
            from: Some(datetime!(2024-05-02 00:00 UTC)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(may_second.len(), 1);
    assert_eq!(may_second[0].category, Some(ExpenseCategory::Fuel));

    let breakdown = module.expense_breakdown().await.unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].category, ExpenseCategory::Service);
    assert_eq!(breakdown[0].total, 700);
}

#[tokio::test]
async fn reports_reflect_completed_rentals() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "5CD 2345").await;
    let idle_vehicle = vehicle(&module, "6CD 2345").await;
    let jan = customer(&module, "Jan").await;
    let petr = customer(&module, "Petr").await;
    let now = OffsetDateTime::now_utc();

    let rentals = [
        (jan, now - Duration::days(10), now - Duration::days(8) - Duration::hours(1)),
        (petr, now - Duration::days(5), now - Duration::days(4) - Duration::hours(1)),
    ];
    for (customer_id, start, end) in rentals {
        let id = book(&module, vehicle_id, customer_id, start, end)
            .await
            .unwrap();
        module
            .hand_over(HandoverDto {
                reservation_id: id,
                start_mileage: Some(1000),
            })
            .await
            .unwrap();
        module
            .return_vehicle(ReturnDto {
                reservation_id: id,
                end_mileage: Some(1000),
            })
            .await
            .unwrap();
    }
    let departure = book(
        &module,
        idle_vehicle,
        jan,
        now.replace_time(time::Time::MIDNIGHT) + Duration::hours(23),
        now.replace_time(time::Time::MIDNIGHT) + Duration::hours(30),
    )
    .await
    .unwrap();

    let utilization = module
        .vehicle_utilization(UtilizationReportDto {
            now,
            window_days: 30,
        })
        .await
        .unwrap();
    let rented = utilization
        .iter()
        .find(|entry| entry.vehicle_id == vehicle_id)
        .unwrap();
    assert_eq!(rented.rented_days, 3);
    let idle = utilization
        .iter()
        .find(|entry| entry.vehicle_id == idle_vehicle)
        .unwrap();
    assert_eq!(idle.rented_days, 0);

    let ranking = module
        .top_customers(TopCustomersReportDto { limit: 5 })
        .await
        .unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].customer_name, "Jan Novak");
    assert_eq!(ranking[0].total, 2400);
    assert_eq!(ranking[1].total, 1200);

    let dashboard = module
        .dashboard(DashboardReportDto { now })
        .await
        .unwrap();
    assert_eq!(dashboard.available_vehicles, 2);
    assert_eq!(dashboard.active_reservations, 0);
    assert_eq!(dashboard.departures_today.len(), 1);
    assert_eq!(dashboard.departures_today[0].id, departure);
    assert_eq!(dashboard.ledger.total_income, 3600);
}

#[tokio::test]
async fn vehicles_are_listed_and_reserved_plates_unique() {
    let module = TestModule::default();
    vehicle(&module, "7CD 2345").await;
    vehicle(&module, "8CD 2345").await;

    let report = module
        .create_vehicle(CreateVehicleDto {
            name: "Duplicate".to_string(),
            license_plate: "7CD 2345".to_string(),
            rate_4h: 0,
            rate_12h: 0,
            daily_rate: 1000,
            current_mileage: 0,
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::Conflict));

    assert_eq!(module.get_all_vehicles().await.unwrap().len(), 2);
}

#[tokio::test]
async fn racing_cancel_and_handover_keep_vehicle_consistent() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "8AB 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let id = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-03 08:00 UTC),
    )
    .await
    .unwrap();

    let (cancelled, handed_over) = tokio::join!(
        module.cancel_reservation(CancelReservationDto { id }),
        module.hand_over(HandoverDto {
            reservation_id: id,
            start_mileage: Some(1000),
        }),
    );
    assert_ne!(cancelled.is_ok(), handed_over.is_ok());

    let reservation = module
        .get_reservation(GetReservationDto { id })
        .await
        .unwrap()
        .unwrap();
    let vehicle = module
        .get_vehicle(GetVehicleDto { id: vehicle_id })
        .await
        .unwrap()
        .unwrap();
    match reservation.status {
        ReservationStatus::Cancelled => assert_eq!(vehicle.status, VehicleStatus::Available),
        ReservationStatus::Active => assert_eq!(vehicle.status, VehicleStatus::Rented),
        other => panic!("unexpected status {other:?}"),
    }
}

#[tokio::test]
async fn price_out_of_range_is_rejected() {
    let module = TestModule::default();
    let vehicle_id = module
        .create_vehicle(CreateVehicleDto {
            name: "Limousine".to_string(),
            license_plate: "9AB 2345".to_string(),
            rate_4h: 0,
            rate_12h: 0,
            daily_rate: i64::MAX / 2,
            current_mileage: 0,
        })
        .await
        .unwrap()
        .id;
    let customer_id = customer(&module, "Jan").await;

    let report = module
        .quote(CreateQuoteDto {
            vehicle_id,
            start: datetime!(2024-05-01 08:00 UTC),
            end: datetime!(2024-05-04 08:00 UTC),
        })
        .await
        .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::InvalidAmount));

    let report = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-04 08:00 UTC),
    )
    .await
    .unwrap_err();
    assert!(matches!(report.current_context(), KernelError::InvalidAmount));
    let reservations = module
        .get_reservations(GetReservationsDto::default())
        .await
        .unwrap();
    assert!(reservations.is_empty());
}

#[tokio::test]
async fn manual_income_cannot_claim_a_rental() {
    let module = TestModule::default();
    let vehicle_id = vehicle(&module, "1AC 2345").await;
    let customer_id = customer(&module, "Jan").await;
    let returned = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-01 08:00 UTC),
        datetime!(2024-05-02 08:00 UTC),
    )
    .await
    .unwrap();
    module
        .hand_over(HandoverDto {
            reservation_id: returned,
            start_mileage: Some(1000),
        })
        .await
        .unwrap();
    module
        .return_vehicle(ReturnDto {
            reservation_id: returned,
            end_mileage: Some(1100),
        })
        .await
        .unwrap();
    let upcoming = book(
        &module,
        vehicle_id,
        customer_id,
        datetime!(2024-05-10 08:00 UTC),
        datetime!(2024-05-11 08:00 UTC),
    )
    .await
    .unwrap();

    let income = |reservation_id| RecordIncomeDto {
        amount: 500,
        date: None,
        description: "Damage fee".to_string(),
        reservation_id: Some(reservation_id),
    };
    let report = module.record_income(income(returned)).await.unwrap_err();
    assert!(matches!(report.current_context(), KernelError::Conflict));
    let report = module.record_income(income(upcoming)).await.unwrap_err();
    assert!(matches!(
        report.current_context(),
        KernelError::InvalidTransition
    ));

    let entries = module
        .get_ledger(GetLedgerDto {
            kind: Some(TransactionKind::Income),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].reservation_id, Some(returned));
}

#[tokio::test]
async fn utilization_window_is_bounded() {
    let module = TestModule::default();
    vehicle(&module, "2AC 2345").await;

    for window_days in [0, -1, 367, 200_000_000_000_000] {
        let report = module
            .vehicle_utilization(UtilizationReportDto {
                now: datetime!(2024-05-31 12:00 UTC),
                window_days,
            })
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::InvalidInterval));
    }
    let report = module
        .vehicle_utilization(UtilizationReportDto {
            now: datetime!(2024-05-31 12:00 UTC),
            window_days: 366,
        })
        .await
        .unwrap();
    assert_eq!(report.len(), 1);
}
