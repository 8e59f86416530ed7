//! Concurrent use of a shared ContractClient

use std::sync::Arc;
use std::time::Duration;

use ethcall_sdk::abi::{encode, MethodDescriptor, ParamType, Token};
use ethcall_sdk::{Address, ContractClient, MockReply, MockRequest, MockTransport, U256};
use tokio::task::JoinSet;

const TOKEN: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

fn owner(i: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&i.to_be_bytes());
    Address::from_bytes(bytes)
}

fn balance_for(i: u64) -> U256 {
    U256::from(i) * U256::exp10(18)
}

/// Answers `balanceOf(owner)` with a balance derived from the owner address
fn balance_handler(request: &MockRequest) -> MockReply {
    let data = request.params[0]["data"].as_str().unwrap_or_default();
    let arg = hex::decode(&data[10..]).unwrap();
    let mut index = [0u8; 8];
    index.copy_from_slice(&arg[24..32]);
    let balance = balance_for(u64::from_be_bytes(index));

    let encoded = encode(&[ParamType::Uint(256)], &[Token::Uint(balance)]).unwrap();
    MockReply::data(&encoded)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_hundred_concurrent_calls() {
    let transport = MockTransport::new();
    transport.set_handler(balance_handler);
    transport.set_latency(Duration::from_millis(1), Duration::from_millis(25));
    let handle = transport.clone();

    let client = Arc::new(ContractClient::with_transport(transport));
    let balance_of = Arc::new(MethodDescriptor::parse("balanceOf(address)(uint256)").unwrap());

    let mut tasks = JoinSet::new();
    for i in 0..100u64 {
        let client = Arc::clone(&client);
        let balance_of = Arc::clone(&balance_of);
        tasks.spawn(async move {
            let result = client
                .call(TOKEN, &balance_of, &[Token::Address(owner(i))])
                .await;
            (i, result)
        });
    }

    let mut seen = 0;
    while let Some(joined) = tasks.join_next().await {
        let (i, result) = joined.unwrap();
        assert_eq!(result.unwrap(), vec![Token::Uint(balance_for(i))], "call {}", i);
        seen += 1;
    }
    assert_eq!(seen, 100);

    let mut ids: Vec<u64> = handle
        .requests()
        .iter()
        .map(|r| r.id.as_u64().unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}

#[tokio::test]
async fn test_failures_do_not_affect_other_calls() {
    let transport = MockTransport::new();
    transport.set_handler(|request| {
        let data = request.params[0]["data"].as_str().unwrap_or_default();
        if data.ends_with("07") {
            MockReply::Error {
                code: -32000,
                message: "execution reverted".to_string(),
            }
        } else {
            balance_handler(request)
        }
    });
    transport.set_latency(Duration::from_millis(1), Duration::from_millis(5));

    let client = Arc::new(ContractClient::with_transport(transport));
    let balance_of = MethodDescriptor::parse("balanceOf(address)(uint256)").unwrap();

    let calls = (0..10u64).map(|i| {
        let client = Arc::clone(&client);
        let balance_of = balance_of.clone();
        async move {
            client
                .call(TOKEN, &balance_of, &[Token::Address(owner(i))])
                .await
        }
    });
    let results = spawn_all(calls).await;

    for (i, result) in results.into_iter().enumerate() {
        if i == 7 {
            assert!(result.is_err());
        } else {
            assert_eq!(result.unwrap(), vec![Token::Uint(balance_for(i as u64))]);
        }
    }
}

/// Spawn every future and collect the results in input order
async fn spawn_all<F>(futures: impl IntoIterator<Item = F>) -> Vec<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    results
}
