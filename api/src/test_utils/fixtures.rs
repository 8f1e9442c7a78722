//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture returns a valid command or entity that tests can customize
//! with struct update syntax.

use crate::domain::entities::{
    Aging, Clarification, Fermentation, InventoryDetails, NewBatch, NewClient, NewOrder,
    NewProfile, OrderRequestDetails, Pressing, Role, SignUp, User, UserId,
};

/// Create a stored user with a placeholder hash
pub fn test_user(username: &str, role: Role) -> User {
    User::new(UserId(1), username, format!("hash-{}", username), role)
}

pub fn sign_up(username: &str) -> SignUp {
    SignUp {
        username: username.to_string(),
        password: "s3cret-pass".to_string(),
        role: Role::Producer,
    }
}

pub fn new_profile() -> NewProfile {
    NewProfile {
        first_name: "Ana".to_string(),
        last_name: "Torres".to_string(),
        email: "ana@vinasur.pe".to_string(),
        company_name: "Viña Sur".to_string(),
        phone_number: "+51 956 123 456".to_string(),
        ruc: "20512345678".to_string(),
        street: "Av. Grau".to_string(),
        number: "120".to_string(),
        city: "Ica".to_string(),
        country: "Peru".to_string(),
    }
}

pub fn new_order() -> NewOrder {
    NewOrder {
        quantity: 24,
        total_price: 480.0,
        order_date: "2024-03-02".to_string(),
        status: None,
    }
}

pub fn order_request_details() -> OrderRequestDetails {
    OrderRequestDetails {
        quantity: 12,
        price: 360,
        status: "pending".to_string(),
        order_number: "OR-1".to_string(),
        order_date: "2024-03-01".to_string(),
        transport_condition: "refrigerated".to_string(),
        payment_method: "transfer".to_string(),
        consumer_phone: "956111222".to_string(),
        producer_phone: "956333444".to_string(),
        payment_terms: "30 days".to_string(),
        date: "2024-03-01".to_string(),
        delivery_date: "2024-03-10".to_string(),
        request_type: "wholesale".to_string(),
    }
}

pub fn inventory_details() -> InventoryDetails {
    InventoryDetails {
        product_name: "Reserva Malbec 2021".to_string(),
        wine_type: "red".to_string(),
        quantity: 120,
        unit_price: 45.5,
        location: "Cellar A".to_string(),
    }
}

pub fn new_client() -> NewClient {
    NewClient {
        person_name: "Luis Quispe".to_string(),
        dni: 45678912,
        email: "luis@distsur.pe".to_string(),
        business_name: "Distribuidora Sur".to_string(),
        phone: 956777888,
        address: "Jr. Lima 455".to_string(),
        country: "Peru".to_string(),
        city: "Arequipa".to_string(),
        ruc: 20601234567,
    }
}

pub fn new_batch() -> NewBatch {
    NewBatch {
        vineyard_code: "VY-ICA-07".to_string(),
        grape_variety: "Malbec".to_string(),
        harvest_campaign: "2024".to_string(),
        reception_date: "2024-02-20".to_string(),
        initial_grape_quantity_kg: 1800.0,
        created_by: "producer-1".to_string(),
    }
}

pub fn fermentation() -> Fermentation {
    Fermentation {
        yeast_used: "Saccharomyces cerevisiae".to_string(),
        fermentation_type: "alcoholic".to_string(),
        start_date: "2024-02-21".to_string(),
        end_date: "2024-03-05".to_string(),
        initial_sugar_level: 240.0,
        final_sugar_level: 2.0,
        initial_ph: 3.6,
        final_ph: 3.4,
        temperature_min: 18.0,
        temperature_max: 26.0,
        tank_code: "T-03".to_string(),
    }
}

pub fn clarification() -> Clarification {
    Clarification {
        method_used: "bentonite".to_string(),
        start_date: "2024-03-06".to_string(),
        end_date: "2024-03-09".to_string(),
        initial_turbidity: 120.0,
        final_turbidity: 8.0,
        wine_volume: 1300.0,
        temperature: 12.0,
        duration_hours: 72,
        comment: "stable".to_string(),
    }
}

pub fn pressing() -> Pressing {
    Pressing {
        press_type: "pneumatic".to_string(),
        start_date: "2024-03-10".to_string(),
        end_date: "2024-03-10".to_string(),
        pressure_bars: 1.8,
        duration_minutes: 150,
        pomace_weight_kg: 320.0,
        yield_liters: 1250.0,
        must_usage: "red wine".to_string(),
    }
}

pub fn aging() -> Aging {
    Aging {
        barrel_type: "French oak".to_string(),
        start_date: "2024-04-01".to_string(),
        end_date: "2025-04-01".to_string(),
        aging_duration_months: 12,
        inspections_performed: 3,
        inspection_result: "Good".to_string(),
    }
}
