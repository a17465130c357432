// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 TlsHarness Contributors

//! End-to-end handshake tests over localhost.
//!
//! Exercises the endpoint configuration layer against the committed fixture
//! tree: mutual authentication with the root-CA PEM scenario, chain
//! verification, both sides of the host-mismatch scenario, and the
//! plaintext baseline.

use rustls::pki_types::ServerName;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::{TlsAcceptor, TlsConnector};

use tlsharness_endpoint::{
    client_config, insecure_client_config, mutual_client_config, mutual_server_config,
    pinned_client_config, server_config,
};
use tlsharness_scenarios::{resolve, ScenarioId};
use tlsharness_test_utils::{fixture_path, workspace_root};

#[tokio::test]
async fn root_ca_pem_handshake_is_mutually_authenticated() {
    let base = workspace_root();
    let scenario = resolve(ScenarioId::RootCaPem);
    let server = mutual_server_config(scenario, &base).expect("server config");
    let client = mutual_client_config(scenario, &base).expect("client config");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let acceptor = TlsAcceptor::from(server);

    let server_task = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut tls = acceptor.accept(stream).await.expect("server handshake");
        assert!(
            tls.get_ref().1.peer_certificates().is_some(),
            "client must have presented a certificate"
        );
        let mut buf = [0u8; 4];
        tls.read_exact(&mut buf).await.expect("server read");
        tls.write_all(&buf).await.expect("server write");
        tls.flush().await.expect("server flush");
    });

    let connector = TlsConnector::from(client);
    let stream = TcpStream::connect(addr).await.expect("connect");
    let name = ServerName::try_from("localhost").expect("server name");
    let mut tls = connector.connect(name, stream).await.expect("client handshake");
    assert!(
        tls.get_ref().1.peer_certificates().is_some(),
        "server must have presented a certificate"
    );
    tls.write_all(b"ping").await.expect("client write");
    let mut buf = [0u8; 4];
    tls.read_exact(&mut buf).await.expect("client read");
    assert_eq!(&buf, b"ping");

    server_task.await.expect("server task");
}

#[tokio::test]
async fn chain_scenario_verifies_against_the_root_anchor() {
    let base = workspace_root();
    let scenario = resolve(ScenarioId::IntermediateCaChainPem);
    let server = server_config(scenario, &base)
        .expect("server config")
        .expect("server credential");
    let client = client_config(scenario, &base)
        .expect("client config")
        .expect("client trust");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let acceptor = TlsAcceptor::from(server);

    let server_task = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut tls = acceptor.accept(stream).await.expect("server handshake");
        let mut buf = [0u8; 2];
        tls.read_exact(&mut buf).await.expect("server read");
        tls.write_all(&buf).await.expect("server write");
        tls.flush().await.expect("server flush");
    });

    let connector = TlsConnector::from(client);
    let stream = TcpStream::connect(addr).await.expect("connect");
    let name = ServerName::try_from("localhost").expect("server name");
    // The client only holds the root; the server-presented chain must carry
    // the intermediate.
    let mut tls = connector.connect(name, stream).await.expect("client handshake");
    tls.write_all(b"ok").await.expect("client write");
    let mut buf = [0u8; 2];
    tls.read_exact(&mut buf).await.expect("client read");
    assert_eq!(&buf, b"ok");

    server_task.await.expect("server task");
}

#[tokio::test]
async fn host_mismatch_fails_hostname_verification() {
    let base = workspace_root();
    let scenario = resolve(ScenarioId::HostMismatch);
    let server = server_config(scenario, &base)
        .expect("server config")
        .expect("server credential");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let acceptor = TlsAcceptor::from(server);

    let server_task = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        // The client aborts the handshake; the server-side error is not
        // interesting here.
        let _ = acceptor.accept(stream).await;
    });

    // Pin the server's own certificate so chain validation passes and the
    // failure is attributable to the identity check alone.
    let client = pinned_client_config(&fixture_path("tls/server-cert-host-mismatch.pem"))
        .expect("pinned client config");
    let connector = TlsConnector::from(client);
    let stream = TcpStream::connect(addr).await.expect("connect");
    let name = ServerName::try_from("localhost").expect("server name");
    let err = connector
        .connect(name, stream)
        .await
        .expect_err("certificate identity must not match the target host");
    let detail = format!("{err:?}");
    assert!(detail.contains("NotValidForName"), "unexpected error: {detail}");

    server_task.await.expect("server task");
}

#[tokio::test]
async fn host_mismatch_bypass_client_completes() {
    let base = workspace_root();
    let scenario = resolve(ScenarioId::HostMismatch);
    let server = server_config(scenario, &base)
        .expect("server config")
        .expect("server credential");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let acceptor = TlsAcceptor::from(server);

    let server_task = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut tls = acceptor.accept(stream).await.expect("server handshake");
        let mut buf = [0u8; 4];
        tls.read_exact(&mut buf).await.expect("server read");
        tls.write_all(&buf).await.expect("server write");
        tls.flush().await.expect("server flush");
    });

    let connector = TlsConnector::from(insecure_client_config());
    let stream = TcpStream::connect(addr).await.expect("connect");
    let name = ServerName::try_from("localhost").expect("server name");
    let mut tls = connector
        .connect(name, stream)
        .await
        .expect("bypass client must complete the handshake");
    tls.write_all(b"mitm").await.expect("client write");
    let mut buf = [0u8; 4];
    tls.read_exact(&mut buf).await.expect("client read");
    assert_eq!(&buf, b"mitm");

    server_task.await.expect("server task");
}

#[tokio::test]
async fn none_scenario_runs_plaintext() {
    let base = workspace_root();
    let scenario = resolve(ScenarioId::None);
    assert!(server_config(scenario, &base).expect("no error").is_none());
    assert!(client_config(scenario, &base).expect("no error").is_none());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let server_task = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let mut buf = [0u8; 5];
        stream.read_exact(&mut buf).await.expect("server read");
        stream.write_all(&buf).await.expect("server write");
    });

    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.write_all(b"plain").await.expect("client write");
    let mut buf = [0u8; 5];
    stream.read_exact(&mut buf).await.expect("client read");
    assert_eq!(&buf, b"plain");

    server_task.await.expect("server task");
}
