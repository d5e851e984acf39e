use getnet::{
    Address, Amount, Brand, Card, Credit, Customer, Device, GetnetConfig, Order, Payment,
    ProductType, Shipping, TokenManager,
};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,getnet=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match GetnetConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(?config, "loaded configuration");

    if let Err(e) = run(&config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(config: &GetnetConfig) -> Result<(), getnet::GetnetError> {
    let manager = TokenManager::new(config.credentials(), config.rest_client());
    let rest = manager.rest();

    println!("Access token");
    let credentials = manager.credentials().await?;
    if let Some(token) = &credentials.access_token {
        println!("  token_type: {}", token.token_type);
        println!("  expires_in: {}", token.expires_in);
        println!("  scope:      {}", token.scope);
    }

    println!("\nCard tokenization");
    let mut card = Card {
        card_number: "5155901222280001".into(),
        brand: Some(Brand::Mastercard),
        card_holder_name: "Emilio Botín".into(),
        expiration_month: "12".into(),
        expiration_year: "28".into(),
        security_code: "123".into(),
        ..Default::default()
    };
    card.number_token = card.tokenize(rest, &credentials).await?;
    println!("  number_token: {}", card.number_token);

    println!("\nCard verification");
    let verification = card.verify(rest, &credentials).await?;
    println!("  status:             {:?}", verification.status);
    println!("  verification_id:    {}", verification.verification_id);
    println!("  authorization_code: {}", verification.authorization_code);

    println!("\nCredit payment");
    let payment = demo_payment(card);
    let credentials = manager.credentials().await?;
    let result = payment.pay(rest, &credentials).await?;
    println!("  payment_id:  {}", result.payment_id);
    println!("  seller_id:   {}", result.seller_id);
    println!("  amount:      {}", result.amount);
    println!("  currency:    {:?}", result.currency);
    println!("  order_id:    {}", result.order_id);
    println!("  status:      {:?}", result.status);
    if let Some(received_at) = result.received_at {
        println!("  received_at: {received_at}");
    }

    Ok(())
}

fn demo_payment(card: Card) -> Payment {
    let address = Address {
        street: "Av. Brasil".into(),
        number: "1000".into(),
        complement: "Sala 1".into(),
        district: "São Geraldo".into(),
        city: "Porto Alegre".into(),
        state: "RS".into(),
        country: "Brasil".into(),
        postal_code: "90230060".into(),
    };

    Payment {
        amount: Amount::new(Decimal::new(1234, 2)),
        order: Order {
            order_id: "beed376a-9774-4b8d-80be-a02536e8771f".into(),
            sales_tax: 0,
            product_type: ProductType::Service,
        },
        customer: Customer {
            customer_id: "ea05ba48-d193-4eb8-a4e9-c9cae1e3e2aa".into(),
            first_name: "João".into(),
            last_name: "da Silva".into(),
            name: "João da Silva".into(),
            email: "customer@email.com.br".into(),
            document_type: "CPF".into(),
            document_number: "12345678912".into(),
            phone_number: "5551999887766".into(),
            billing_address: address.clone(),
        },
        device: Some(Device {
            device_id: "ad38ae20-223c-4875-8797-0749abeb7e08".into(),
            ip_address: "127.0.0.1".into(),
        }),
        shippings: vec![Shipping {
            first_name: "João".into(),
            name: "João da Silva".into(),
            email: "customer@email.com.br".into(),
            phone_number: "5551999887766".into(),
            address,
            ..Default::default()
        }],
        credit: Credit {
            card,
            ..Default::default()
        },
        ..Default::default()
    }
}
