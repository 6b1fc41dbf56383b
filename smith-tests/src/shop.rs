#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    pub id: u64,
    pub origin: String,
    pub destination: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub customer: Customer,
    pub shipments: Vec<Shipment>,
}

include!(concat!(env!("OUT_DIR"), "/shop/shipment_builder.rs"));
include!(concat!(env!("OUT_DIR"), "/shop/order_builder.rs"));
