//! Shared harness for the integration suites: a funded seller/buyer pair,
//! an engine wired to the codebook capability, and shorthand for driving a
//! deal to a given point in its lifecycle.

use std::sync::Arc;

use rust_decimal::Decimal;
use sealbid_engine::{Codebook, CodebookEncryptor, DealEngine, EncryptionContext, Encryptor};
use sealbid_ledger::{AssetCustody, Ledger};
use sealbid_types::{DealId, DealMode, EncryptedInput, EngineConfig, PartyId};

pub const ASSET: &str = "GOLD";
pub const PAY: &str = "USDC";

pub struct Harness {
    pub engine: Arc<DealEngine>,
    pub custody: Arc<AssetCustody>,
    pub encryptor: CodebookEncryptor,
    pub seller: PartyId,
    pub buyer: PartyId,
    pub admin: PartyId,
}

impl Harness {
    /// Engine plus a seller holding 1000 GOLD and a buyer holding 5000 USDC.
    pub fn funded() -> Self {
        init_logs();

        let custody = Arc::new(AssetCustody::new());
        let (encryptor, oracle) = Codebook::pair([11u8; 32]);
        let admin = PartyId::new();
        let engine = Arc::new(DealEngine::new(
            Arc::new(Ledger::new()),
            Arc::clone(&custody),
            Arc::new(oracle),
            EngineConfig::new(admin),
        ));

        let seller = PartyId::new();
        let buyer = PartyId::new();
        custody.deposit(seller, ASSET, Decimal::new(1000, 0));
        custody.deposit(buyer, PAY, Decimal::new(5000, 0));

        Self {
            engine,
            custody,
            encryptor,
            seller,
            buyer,
            admin,
        }
    }

    /// Encrypt a clear value bound to this deal/party pair.
    pub fn enc(&self, deal_id: DealId, party: PartyId, value: u32) -> EncryptedInput {
        self.encryptor
            .encrypt32(
                value,
                &EncryptionContext { deal_id, party },
            )
            .expect("codebook encryption should not fail")
    }

    /// Create a P2P deal escrowing `amount` GOLD against USDC payment.
    pub fn create_p2p(&self, amount: Decimal) -> DealId {
        self.engine
            .create_deal(self.seller, DealMode::P2p, Some(self.buyer), ASSET, amount, PAY)
            .expect("deal creation should succeed")
    }

    /// Create a P2P deal and submit both prices, leaving the deal `Ready`.
    pub fn ready_deal(&self, ask: u32, bid: u32, threshold: u32) -> DealId {
        let deal_id = self.create_p2p(Decimal::new(1000, 0));
        let enc_ask = self.enc(deal_id, self.seller, ask);
        let enc_threshold = self.enc(deal_id, self.seller, threshold);
        self.engine
            .submit_ask(deal_id, self.seller, enc_ask, Some(enc_threshold))
            .expect("ask submission should succeed");
        let enc_bid = self.enc(deal_id, self.buyer, bid);
        self.engine
            .submit_bid(deal_id, self.buyer, enc_bid)
            .expect("bid submission should succeed");
        deal_id
    }
}

fn init_logs() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}
