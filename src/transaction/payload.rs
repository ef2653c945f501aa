//! Wire representation of a transaction-start request.
//!
//! [`StartTransactionPayload`] is assembled from [`TransactionStartOptions`] in
//! a single pass. Nothing here is mutated after construction; optional values
//! that are absent or falsy are left out of the serialized JSON entirely.

use serde::Serialize;

use crate::{
    transaction::{
        options::{Address, EndUser, InvoiceAddress, Product, ProductType, TransactionStartOptions},
        vat::VatCode,
    },
    types::{MinorUnits, format_date, format_date_time},
};

/// Identifies this SDK as the origin of the call in `statsData.object`.
pub const SDK_MARKER: &str = "rustsdk";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTransactionPayload {
    pub amount: MinorUnits,
    pub finish_url: String,
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_option_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_option_sub_id: Option<PaymentOptionSubId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_mode: Option<u8>,
    #[serde(skip_serializing_if = "TransactionData::is_empty")]
    pub transaction: TransactionData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_data: Option<StatsData>,
    #[serde(skip_serializing_if = "EndUserData::is_empty")]
    pub enduser: EndUserData,
    #[serde(skip_serializing_if = "SaleData::is_empty")]
    pub sale_data: SaleData,
}

/// Either an issuer (bank) id or a terminal TH-code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PaymentOptionSubId {
    Bank(u32),
    Terminal(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_exchange_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
}

impl TransactionData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra3: Option<String>,
    pub object: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndUserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_address: Option<InvoiceAddressData>,
}

impl EndUserData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An address as sent to the API: house numbers travel as `streetNumber*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl AddressData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceAddressData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(flatten)]
    pub address: AddressData,
}

impl InvoiceAddressData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_data: Option<Vec<OrderLine>>,
}

impl SaleData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub description: String,
    pub price: MinorUnits,
    pub quantity: u32,
    pub vat_code: VatCode,
    pub product_type: ProductType,
}

/// Drop empty strings, which the API treats the same as a missing field.
fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

impl From<&Address> for AddressData {
    fn from(address: &Address) -> Self {
        AddressData {
            street_name: present(&address.street_name),
            street_number: present(&address.house_number),
            street_number_extension: present(&address.house_number_extension),
            zip_code: present(&address.zip_code),
            city: present(&address.city),
            country_code: present(&address.country_code),
        }
    }
}

impl From<&InvoiceAddress> for InvoiceAddressData {
    fn from(invoice_address: &InvoiceAddress) -> Self {
        InvoiceAddressData {
            initials: present(&invoice_address.initials),
            last_name: present(&invoice_address.last_name),
            gender: present(&invoice_address.gender),
            address: AddressData::from(&invoice_address.address),
        }
    }
}

impl From<&Product> for OrderLine {
    fn from(product: &Product) -> Self {
        OrderLine {
            product_id: product.id.clone(),
            description: product.name.clone(),
            price: MinorUnits::from_major(product.price),
            quantity: product.qty,
            vat_code: VatCode::infer(product.price, product.tax),
            product_type: product.product_type,
        }
    }
}

fn enduser_data(language: Option<String>, enduser: Option<&EndUser>) -> EndUserData {
    let mut data = EndUserData {
        language,
        ..EndUserData::default()
    };
    if let Some(enduser) = enduser {
        data.initials = present(&enduser.initials);
        data.last_name = present(&enduser.last_name);
        data.gender = present(&enduser.gender);
        data.dob = enduser.dob.map(format_date);
        data.phone_number = present(&enduser.phone_number);
        data.email_address = present(&enduser.email_address);
    }
    data
}

impl From<&TransactionStartOptions> for StartTransactionPayload {
    fn from(options: &TransactionStartOptions) -> Self {
        let payment_option_sub_id = match (present(&options.terminal_id), options.bank_id) {
            (Some(terminal), _) => Some(PaymentOptionSubId::Terminal(terminal)),
            (None, Some(bank)) if bank != 0 => Some(PaymentOptionSubId::Bank(bank)),
            _ => None,
        };

        let transaction = TransactionData {
            currency: present(&options.currency),
            expire_date: options.expire_date.map(format_date_time),
            order_exchange_url: present(&options.exchange_url),
            description: present(&options.description),
            order_number: present(&options.order_number),
        };

        let extras = [
            present(&options.extra1),
            present(&options.extra2),
            present(&options.extra3),
        ];
        let stats_data = extras.iter().any(Option::is_some).then(|| {
            let [extra1, extra2, extra3] = extras;
            StatsData {
                extra1,
                extra2,
                extra3,
                object: SDK_MARKER,
            }
        });

        let mut enduser = enduser_data(present(&options.language), options.enduser.as_ref());
        enduser.address = options
            .address
            .as_ref()
            .map(AddressData::from)
            .filter(|address| !address.is_empty());
        enduser.invoice_address = options
            .invoice_address
            .as_ref()
            .map(InvoiceAddressData::from)
            .filter(|address| !address.is_empty());

        let sale_data = SaleData {
            invoice_date: options.invoice_date.map(format_date),
            delivery_date: options.delivery_date.map(format_date),
            order_data: (!options.products.is_empty())
                .then(|| options.products.iter().map(OrderLine::from).collect()),
        };

        StartTransactionPayload {
            amount: MinorUnits::from_major(options.amount),
            finish_url: options.return_url.clone(),
            ip_address: options.ip_address.clone(),
            payment_option_id: options.payment_method_id.filter(|id| *id != 0),
            payment_option_sub_id,
            test_mode: options.test_mode.then_some(1),
            transaction,
            stats_data,
            enduser,
            sale_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn minimal() -> TransactionStartOptions {
        TransactionStartOptions::builder()
            .amount(12.5)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .build()
    }

    fn to_json(options: &TransactionStartOptions) -> serde_json::Value {
        serde_json::to_value(StartTransactionPayload::from(options)).unwrap()
    }

    #[test]
    fn minimal_options_produce_only_required_fields() {
        assert_eq!(
            to_json(&minimal()),
            json!({
                "amount": 1250,
                "finishUrl": "https://shop.example.com/return",
                "ipAddress": "10.20.30.40",
            })
        );
    }

    #[test]
    fn amount_is_converted_to_minor_units() {
        let options = TransactionStartOptions::builder()
            .amount(19.99)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .build();
        assert_eq!(to_json(&options)["amount"], json!(1999));
    }

    #[test]
    fn empty_strings_and_falsy_values_are_omitted() {
        let options = TransactionStartOptions::builder()
            .amount(1.0)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .currency("")
            .description("")
            .payment_method_id(0)
            .bank_id(0)
            .test_mode(false)
            .language("")
            .extra1("")
            .build();

        let value = to_json(&options);
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(!object.contains_key("statsData"));
        assert!(!object.contains_key("transaction"));
        assert!(!object.contains_key("testMode"));
    }

    #[test]
    fn full_options_map_to_nested_sections() {
        let options = TransactionStartOptions::builder()
            .amount(121.0)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .currency("EUR")
            .expire_date(
                NaiveDate::from_ymd_opt(2024, 5, 1)
                    .unwrap()
                    .and_hms_opt(14, 30, 0)
                    .unwrap(),
            )
            .exchange_url("https://shop.example.com/exchange")
            .payment_method_id(10)
            .bank_id(1)
            .description("Order 42")
            .order_number("42")
            .test_mode(true)
            .language("NL")
            .extra1("campaign")
            .extra3("tag")
            .invoice_date(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap())
            .delivery_date(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap())
            .products(vec![
                Product::builder()
                    .id("SKU-1")
                    .name("Chair")
                    .price(121.0)
                    .tax(21.0)
                    .qty(1)
                    .product_type(ProductType::Article)
                    .build(),
                Product::builder()
                    .id("SHIP")
                    .name("Shipping")
                    .price(4.95)
                    .qty(1)
                    .product_type(ProductType::Shipping)
                    .build(),
            ])
            .enduser(
                EndUser::builder()
                    .initials("J.")
                    .last_name("Jansen")
                    .gender("M")
                    .dob(NaiveDate::from_ymd_opt(1980, 1, 9).unwrap())
                    .email_address("j.jansen@example.com")
                    .build(),
            )
            .build();

        assert_eq!(
            to_json(&options),
            json!({
                "amount": 12100,
                "finishUrl": "https://shop.example.com/return",
                "ipAddress": "10.20.30.40",
                "paymentOptionId": 10,
                "paymentOptionSubId": 1,
                "testMode": 1,
                "transaction": {
                    "currency": "EUR",
                    "expireDate": "01-05-2024 14:30:00",
                    "orderExchangeUrl": "https://shop.example.com/exchange",
                    "description": "Order 42",
                    "orderNumber": "42",
                },
                "statsData": {
                    "extra1": "campaign",
                    "extra3": "tag",
                    "object": "rustsdk",
                },
                "enduser": {
                    "language": "NL",
                    "initials": "J.",
                    "lastName": "Jansen",
                    "gender": "M",
                    "dob": "09-01-1980",
                    "emailAddress": "j.jansen@example.com",
                },
                "saleData": {
                    "invoiceDate": "30-04-2024",
                    "deliveryDate": "03-05-2024",
                    "orderData": [
                        {
                            "productId": "SKU-1",
                            "description": "Chair",
                            "price": 12100,
                            "quantity": 1,
                            "vatCode": "H",
                            "productType": "ARTICLE",
                        },
                        {
                            "productId": "SHIP",
                            "description": "Shipping",
                            "price": 495,
                            "quantity": 1,
                            "vatCode": "N",
                            "productType": "SHIPPING",
                        },
                    ],
                },
            })
        );
    }

    #[test]
    fn terminal_overrides_bank() {
        let options = TransactionStartOptions::builder()
            .amount(5.0)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .bank_id(7)
            .terminal_id("TH-1234-5678")
            .build();
        assert_eq!(to_json(&options)["paymentOptionSubId"], json!("TH-1234-5678"));
    }

    #[test]
    fn addresses_use_street_number_keys() {
        let address = Address::builder()
            .street_name("Kerkstraat")
            .house_number("12")
            .house_number_extension("A")
            .zip_code("1234AB")
            .city("Amsterdam")
            .country_code("NL")
            .build();

        let options = TransactionStartOptions::builder()
            .amount(5.0)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .address(address.clone())
            .invoice_address(
                InvoiceAddress::builder()
                    .address(Address::builder().house_number("3").build())
                    .initials("P.")
                    .last_name("de Vries")
                    .build(),
            )
            .build();

        let value = to_json(&options);
        assert_eq!(
            value["enduser"]["address"],
            json!({
                "streetName": "Kerkstraat",
                "streetNumber": "12",
                "streetNumberExtension": "A",
                "zipCode": "1234AB",
                "city": "Amsterdam",
                "countryCode": "NL",
            })
        );
        assert_eq!(
            value["enduser"]["invoiceAddress"],
            json!({
                "initials": "P.",
                "lastName": "de Vries",
                "streetNumber": "3",
            })
        );

        let shipping = value["enduser"]["address"].as_object().unwrap();
        assert!(!shipping.contains_key("houseNumber"));
        assert!(!shipping.contains_key("houseNumberExtension"));
    }

    #[test]
    fn blank_addresses_do_not_create_an_enduser_section() {
        let options = TransactionStartOptions::builder()
            .amount(5.0)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .address(Address::builder().house_number("").build())
            .invoice_address(
                InvoiceAddress::builder()
                    .address(Address::builder().city("").build())
                    .initials("")
                    .build(),
            )
            .build();

        assert_eq!(
            to_json(&options),
            json!({
                "amount": 500,
                "finishUrl": "https://shop.example.com/return",
                "ipAddress": "10.20.30.40",
            })
        );
    }

    #[test]
    fn blank_address_is_dropped_next_to_other_enduser_fields() {
        let options = TransactionStartOptions::builder()
            .amount(5.0)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .language("NL")
            .address(Address::builder().street_name("").build())
            .build();

        assert_eq!(to_json(&options)["enduser"], json!({ "language": "NL" }));
    }

    #[test]
    fn every_line_price_is_scaled() {
        let products = [0.01, 2.675, 9.99, 1234.56]
            .into_iter()
            .enumerate()
            .map(|(i, price)| {
                Product::builder()
                    .id(format!("P{i}"))
                    .name("item")
                    .price(price)
                    .qty(2)
                    .product_type(ProductType::Article)
                    .build()
            })
            .collect::<Vec<_>>();

        let options = TransactionStartOptions::builder()
            .amount(10.0)
            .return_url("https://shop.example.com/return")
            .ip_address("10.20.30.40")
            .products(products.clone())
            .build();

        let payload = StartTransactionPayload::from(&options);
        let lines = payload.sale_data.order_data.unwrap();
        for (line, product) in lines.iter().zip(&products) {
            assert_eq!(line.price, MinorUnits::from_major(product.price));
        }
        assert_eq!(lines[0].price, MinorUnits(1));
        assert_eq!(lines[3].price, MinorUnits(123456));
    }
}
